use pdf_letterhead::flow::{PageLayout, layout_text};
use pdf_letterhead::{BuiltinMetrics, GenerateError, GenerateOptions, GlyphMeasure, TextRun};
use pdf_template::Rect;

/// Margin-style layout on a US Letter page: title band at the top of the
/// content area on page 0, full content area on later pages.
fn margin_layout(with_title: bool) -> PageLayout {
    let content = Rect::new(56.0, 56.0, 500.0, 680.0);
    PageLayout {
        page_width: 612.0,
        page_height: 792.0,
        template_pages: 1,
        title: with_title.then(|| Rect::new(56.0, 672.0, 500.0, 64.0)),
        first_body: if with_title {
            Rect::new(56.0, 56.0, 500.0, 616.0)
        } else {
            content
        },
        later_body: content,
        zone_layout: false,
    }
}

fn body_runs(runs: &[TextRun]) -> Vec<&TextRun> {
    runs.iter()
        .filter(|r| !r.bold && !r.text.starts_with("Page "))
        .collect()
}

#[test]
fn test_short_body_fits_one_page() {
    let plan = layout_text(
        "Memo",
        "Hello world",
        &margin_layout(true),
        &GenerateOptions::default(),
        &BuiltinMetrics,
    )
    .unwrap();

    assert_eq!(plan.page_count(), 1);
    let runs = &plan.pages[0].runs;
    assert!(runs.iter().any(|r| r.bold && r.text == "Memo"));
    assert!(runs.iter().any(|r| !r.bold && r.text == "Hello world"));
    // Single page: no stamps.
    assert!(!runs.iter().any(|r| r.text.starts_with("Page ")));
}

#[test]
fn test_long_body_overflows_and_stamps() {
    let body = "A reasonably long paragraph of flowing text that wraps. ".repeat(200);
    let options = GenerateOptions::default();
    let plan = layout_text("Title", &body, &margin_layout(true), &options, &BuiltinMetrics).unwrap();

    let total = plan.page_count();
    assert!(total > 1);

    for (index, page) in plan.pages.iter().enumerate() {
        // Overflow pages clone the first template page.
        assert_eq!(page.template_page, 0);
        // Title appears only on the first page.
        if index > 0 {
            assert!(!page.runs.iter().any(|r| r.bold));
        }
        let stamp = format!("Page {} of {}", index + 1, total);
        assert!(page.runs.iter().any(|r| r.text == stamp));
    }
}

#[test]
fn test_stamps_disabled_by_option() {
    let body = "Words enough to push the flow onto several pages. ".repeat(200);
    let options = GenerateOptions {
        stamp_page_numbers: false,
        ..Default::default()
    };
    let plan = layout_text("", &body, &margin_layout(false), &options, &BuiltinMetrics).unwrap();

    assert!(plan.page_count() > 1);
    assert!(
        plan.pages
            .iter()
            .all(|p| !p.runs.iter().any(|r| r.text.starts_with("Page ")))
    );
}

#[test]
fn test_block_gap_is_one_extra_line_height() {
    let options = GenerateOptions::default();
    let plan = layout_text(
        "",
        "Line1\n\nLine2",
        &margin_layout(false),
        &options,
        &BuiltinMetrics,
    )
    .unwrap();

    let runs = &plan.pages[0].runs;
    assert_eq!(runs.len(), 2);
    let gap = runs[0].y - runs[1].y;
    assert!(
        (gap - 2.0 * options.body_leading).abs() < 1e-3,
        "block gap should be two leadings, got {gap}"
    );
}

#[test]
fn test_single_newline_is_a_plain_line_advance() {
    let options = GenerateOptions::default();
    let plan = layout_text(
        "",
        "Line1\nLine2",
        &margin_layout(false),
        &options,
        &BuiltinMetrics,
    )
    .unwrap();

    let runs = &plan.pages[0].runs;
    assert_eq!(runs.len(), 2);
    let gap = runs[0].y - runs[1].y;
    assert!((gap - options.body_leading).abs() < 1e-3);
}

#[test]
fn test_whitespace_line_is_a_spacer() {
    let options = GenerateOptions::default();
    let plan = layout_text(
        "",
        "Line1\n \nLine2",
        &margin_layout(false),
        &options,
        &BuiltinMetrics,
    )
    .unwrap();

    let runs = &plan.pages[0].runs;
    assert_eq!(runs.len(), 2, "a whitespace line must not emit text");
    let gap = runs[0].y - runs[1].y;
    assert!((gap - 2.0 * options.body_leading).abs() < 1e-3);
}

#[test]
fn test_spacer_run_across_page_break_stays_in_zone() {
    let layout = margin_layout(false);
    let options = GenerateOptions::default();
    // Enough blank lines to walk the cursor through a page break and far
    // beyond it if they were allowed to keep advancing.
    let body = format!("First line\n{}Last line", " \n".repeat(150));
    let plan = layout_text("", &body, &layout, &options, &BuiltinMetrics).unwrap();

    assert_eq!(plan.page_count(), 2);
    for page in &plan.pages {
        for run in body_runs(&page.runs) {
            assert!(
                run.y >= layout.later_body.y,
                "{:?} at y={} is below the zone bottom",
                run.text,
                run.y
            );
        }
    }

    // The line after the blank run opens the next page at the zone top.
    let last = body_runs(&plan.pages[1].runs)[0];
    assert_eq!(last.text, "Last line");
    let top = layout.later_body.top() - options.zone_padding - options.body_font_size;
    assert!((last.y - top).abs() < 1e-3);
}

#[test]
fn test_leading_blank_lines_swallowed_on_first_page() {
    let options = GenerateOptions::default();
    let plan = layout_text(
        "",
        " \n \nLine1",
        &margin_layout(false),
        &options,
        &BuiltinMetrics,
    )
    .unwrap();

    let runs = body_runs(&plan.pages[0].runs);
    assert_eq!(runs.len(), 1);
    let layout = margin_layout(false);
    let top = layout.first_body.top() - options.zone_padding - options.body_font_size;
    assert!((runs[0].y - top).abs() < 1e-3, "blank lines must not push the first line down");
}

#[test]
fn test_wrapped_lines_fit_usable_width() {
    let layout = margin_layout(false);
    let options = GenerateOptions::default();
    let body = "The quick brown fox jumps over the lazy dog again and again, \
                wrapping across many consecutive lines of measured text. "
        .repeat(30);
    let plan = layout_text("", &body, &layout, &options, &BuiltinMetrics).unwrap();

    let usable = layout.first_body.width - 2.0 * options.zone_padding;
    for page in &plan.pages {
        for run in body_runs(&page.runs) {
            let width = BuiltinMetrics.width(&run.text, false, run.size);
            assert!(
                width <= usable + 1e-3,
                "{:?} measures {width}, usable {usable}",
                run.text
            );
        }
    }
}

#[test]
fn test_overlong_word_emitted_alone() {
    let layout = PageLayout {
        first_body: Rect::new(56.0, 56.0, 60.0, 680.0),
        later_body: Rect::new(56.0, 56.0, 60.0, 680.0),
        ..margin_layout(false)
    };
    let plan = layout_text(
        "",
        "a Honorificabilitudinitatibus b",
        &layout,
        &GenerateOptions::default(),
        &BuiltinMetrics,
    )
    .unwrap();

    let runs = &plan.pages[0].runs;
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[1].text, "Honorificabilitudinitatibus");
}

#[test]
fn test_title_lines_capped_by_zone_height() {
    let options = GenerateOptions::default();
    // Zone fits exactly two title lines.
    let layout = PageLayout {
        title: Some(Rect::new(56.0, 700.0, 120.0, 2.0 * options.title_leading)),
        ..margin_layout(true)
    };
    let long_title =
        "An Exceedingly Verbose and Thoroughly Overlong Heading For Such A Narrow Zone";
    let plan = layout_text(long_title, "body", &layout, &options, &BuiltinMetrics).unwrap();

    let title_lines = plan.pages[0].runs.iter().filter(|r| r.bold).count();
    assert_eq!(title_lines, 2);
    assert_eq!(plan.page_count(), 1, "title never overflows to a new page");
}

#[test]
fn test_short_zone_places_one_line_per_page() {
    // A body zone shorter than one line still accepts a line per page.
    let tiny = Rect::new(56.0, 700.0, 500.0, 6.0);
    let layout = PageLayout {
        title: None,
        first_body: tiny,
        later_body: tiny,
        ..margin_layout(false)
    };
    let plan = layout_text(
        "",
        "one\ntwo\nthree",
        &layout,
        &GenerateOptions::default(),
        &BuiltinMetrics,
    )
    .unwrap();

    assert_eq!(plan.page_count(), 3);
    for page in &plan.pages {
        assert_eq!(body_runs(&page.runs).len(), 1);
    }
}

#[test]
fn test_page_limit_exceeded() {
    let body = "line\n".repeat(5000);
    let options = GenerateOptions {
        max_pages: 3,
        ..Default::default()
    };
    match layout_text("", &body, &margin_layout(false), &options, &BuiltinMetrics) {
        Err(GenerateError::PageLimitExceeded { limit: 3 }) => {}
        other => panic!("Expected PageLimitExceeded, got {:?}", other.map(|p| p.page_count())),
    }
}

#[test]
fn test_later_pages_use_enlarged_zone() {
    let first = Rect::new(40.0, 60.0, 532.0, 400.0);
    let later = Rect::new(40.0, 60.0, 532.0, 696.0);
    let layout = PageLayout {
        page_width: 612.0,
        page_height: 792.0,
        template_pages: 1,
        title: Some(Rect::new(40.0, 700.0, 532.0, 56.0)),
        first_body: first,
        later_body: later,
        zone_layout: true,
    };
    let options = GenerateOptions::default();
    let body = "flow onward ".repeat(600);
    let plan = layout_text("Heading", &body, &layout, &options, &BuiltinMetrics).unwrap();

    assert!(plan.page_count() > 1);
    let first_top = first.top() - options.zone_padding - options.body_font_size;
    let later_top = later.top() - options.zone_padding - options.body_font_size;
    let page0_start = body_runs(&plan.pages[0].runs)[0].y;
    let page1_start = body_runs(&plan.pages[1].runs)[0].y;
    assert!((page0_start - first_top).abs() < 1e-3);
    assert!((page1_start - later_top).abs() < 1e-3);
}

#[test]
fn test_multi_page_template_consumed_before_cloning() {
    let layout = PageLayout {
        template_pages: 2,
        ..margin_layout(false)
    };
    let body = "steady stream of text to fill pages. ".repeat(300);
    let plan = layout_text("", &body, &layout, &GenerateOptions::default(), &BuiltinMetrics)
        .unwrap();

    assert!(plan.page_count() >= 3);
    assert_eq!(plan.pages[0].template_page, 0);
    assert_eq!(plan.pages[1].template_page, 1);
    assert_eq!(plan.pages[2].template_page, 0);
}

#[test]
fn test_empty_body_still_yields_one_page() {
    let plan = layout_text(
        "Only a Title",
        "",
        &margin_layout(true),
        &GenerateOptions::default(),
        &BuiltinMetrics,
    )
    .unwrap();
    assert_eq!(plan.page_count(), 1);
    assert!(plan.pages[0].runs.iter().any(|r| r.bold));
}

#[test]
fn test_stamp_offset_differs_by_layout_kind() {
    let body = "enough text to reach a second page for the stamp check. ".repeat(200);
    let options = GenerateOptions::default();

    let margin_plan =
        layout_text("", &body, &margin_layout(false), &options, &BuiltinMetrics).unwrap();
    let zone_layout = PageLayout {
        zone_layout: true,
        ..margin_layout(false)
    };
    let zone_plan = layout_text("", &body, &zone_layout, &options, &BuiltinMetrics).unwrap();

    let stamp_y = |plan: &pdf_letterhead::RenderPlan| {
        plan.pages[0]
            .runs
            .iter()
            .find(|r| r.text.starts_with("Page "))
            .map(|r| r.y)
            .unwrap()
    };
    assert_ne!(stamp_y(&margin_plan), stamp_y(&zone_plan));
}
