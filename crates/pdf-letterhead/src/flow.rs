//! Text flow and pagination
//!
//! The flow pass is pure: it consumes title and body strings, a page layout,
//! and a glyph measure, and produces a `RenderPlan`. No PDF types cross into
//! it. The vertical cursor is explicit state on the flow value, so the
//! algorithm is testable without any rendering concern.
//!
//! Every step either consumes a word or moves the cursor down by one line
//! height, so the pass terminates in O(words + pages) even for a single word
//! wider than any zone; the page ceiling bounds the worst case.

use crate::constants::{STAMP_FONT_SIZE, STAMP_OFFSET_MARGIN, STAMP_OFFSET_ZONE};
use crate::metrics::GlyphMeasure;
use crate::options::GenerateOptions;
use crate::types::{GenerateError, PagePlan, RenderPlan, Result, TextRun};
use pdf_template::Rect;

/// Resolved page geometry the flow pass runs against.
///
/// The first page's body rectangle differs from later pages': when a title
/// zone exists its vertical space is merged into the body on pages after the
/// first, since the title is never repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    /// Pages the template itself supplies; overflow clones the first page.
    pub template_pages: usize,
    /// Title rectangle on the first page, if a title is rendered at all.
    pub title: Option<Rect>,
    /// Body rectangle on the first page.
    pub first_body: Rect,
    /// Body rectangle on every page after the first.
    pub later_body: Rect,
    /// True when the rectangles came from declared zones.
    pub zone_layout: bool,
}

/// Flow title and body text across as many pages as they need.
pub fn layout_text(
    title: &str,
    body: &str,
    layout: &PageLayout,
    options: &GenerateOptions,
    measure: &dyn GlyphMeasure,
) -> Result<RenderPlan> {
    let mut flow = Flow::new(layout, options, measure);
    flow.place_title(title);
    flow.place_body(body)?;
    flow.stamp_pages();

    Ok(RenderPlan {
        pages: flow.pages,
        zone_layout: layout.zone_layout,
    })
}

/// Greedy word wrap. Words never split; a single word wider than the line
/// is emitted alone.
pub(crate) fn wrap_line(
    text: &str,
    max_width: f32,
    bold: bool,
    size: f32,
    measure: &dyn GlyphMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure.width(&candidate, bold, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

struct Flow<'a> {
    layout: &'a PageLayout,
    options: &'a GenerateOptions,
    measure: &'a dyn GlyphMeasure,
    pages: Vec<PagePlan>,
    /// Active body rectangle of the current page.
    zone: Rect,
    /// Baseline of the next emitted line.
    y: f32,
    /// A fresh page accepts its first line unconditionally, so a
    /// positive-but-short zone places one line per page instead of
    /// requesting pages forever.
    fresh: bool,
}

impl<'a> Flow<'a> {
    fn new(
        layout: &'a PageLayout,
        options: &'a GenerateOptions,
        measure: &'a dyn GlyphMeasure,
    ) -> Self {
        let zone = layout.first_body;
        let y = zone.top() - options.zone_padding - options.body_font_size;
        Self {
            layout,
            options,
            measure,
            pages: vec![PagePlan {
                template_page: 0,
                runs: Vec::new(),
            }],
            zone,
            y,
            fresh: true,
        }
    }

    /// Lay the title into its rectangle on the first page. The title has no
    /// overflow page: lines beyond the rectangle's capacity are discarded.
    fn place_title(&mut self, title: &str) {
        let Some(rect) = self.layout.title else {
            return;
        };
        if title.trim().is_empty() {
            return;
        }

        let padding = self.options.zone_padding;
        let size = self.options.title_font_size;
        let leading = self.options.title_leading;
        let usable = rect.width - 2.0 * padding;

        let lines = wrap_line(title, usable, true, size, self.measure);
        let max_lines = ((rect.height / leading).floor() as usize).max(1);
        if lines.len() > max_lines {
            log::debug!(
                "title needs {} lines but the zone fits {max_lines}, discarding the rest",
                lines.len()
            );
        }

        let mut y = rect.top() - padding - size;
        for line in lines.into_iter().take(max_lines) {
            self.pages[0].runs.push(TextRun {
                text: line,
                x: rect.x + padding,
                y,
                size,
                bold: true,
            });
            y -= leading;
        }
    }

    /// Flow the body: blocks separated by blank lines, logical lines wrapped
    /// independently, blank logical lines advancing the cursor as spacers.
    fn place_body(&mut self, body: &str) -> Result<()> {
        let normalized = body.replace("\r\n", "\n").replace('\r', "\n");
        let blocks = split_blocks(&normalized);

        for (index, block) in blocks.iter().enumerate() {
            if index > 0 {
                // Exactly one extra line height between blocks.
                self.spacer()?;
            }
            for line in block {
                if line.trim().is_empty() {
                    self.spacer()?;
                } else {
                    let usable = self.zone.width - 2.0 * self.options.zone_padding;
                    let wrapped = wrap_line(
                        line,
                        usable,
                        false,
                        self.options.body_font_size,
                        self.measure,
                    );
                    for wrapped_line in wrapped {
                        self.emit_line(wrapped_line)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Lowest baseline the active zone accepts.
    fn floor(&self) -> f32 {
        self.zone.y + self.options.zone_padding + self.options.body_font_size
    }

    fn emit_line(&mut self, text: String) -> Result<()> {
        if !self.fresh && self.y < self.floor() {
            self.new_page()?;
        }
        let page = self.pages.last_mut().expect("at least one page");
        page.runs.push(TextRun {
            text,
            x: self.zone.x + self.options.zone_padding,
            y: self.y,
            size: self.options.body_font_size,
            bold: false,
        });
        self.y -= self.options.body_leading;
        self.fresh = false;
        Ok(())
    }

    /// Advance the cursor one line height without emitting text. On a fresh
    /// page the spacer is swallowed whole: the page break already supplies
    /// the gap, and a run of blank lines must not walk the cursor below the
    /// zone before the first real line lands.
    fn spacer(&mut self) -> Result<()> {
        if self.fresh {
            return Ok(());
        }
        if self.y < self.floor() {
            self.new_page()?;
            return Ok(());
        }
        self.y -= self.options.body_leading;
        Ok(())
    }

    /// Open the next output page, backed by the next template page while the
    /// template has any, then by clones of its first page.
    fn new_page(&mut self) -> Result<()> {
        if self.pages.len() >= self.options.max_pages {
            return Err(GenerateError::PageLimitExceeded {
                limit: self.options.max_pages,
            });
        }

        let index = self.pages.len();
        let template_page = if index < self.layout.template_pages {
            index
        } else {
            0
        };
        self.pages.push(PagePlan {
            template_page,
            runs: Vec::new(),
        });

        self.zone = self.layout.later_body;
        self.y = self.zone.top() - self.options.zone_padding - self.options.body_font_size;
        self.fresh = true;
        Ok(())
    }

    /// Stamp "Page i of N" once the document runs past one page.
    fn stamp_pages(&mut self) {
        let total = self.pages.len();
        if total <= 1 || !self.options.stamp_page_numbers {
            return;
        }

        let offset = if self.layout.zone_layout {
            STAMP_OFFSET_ZONE
        } else {
            STAMP_OFFSET_MARGIN
        };
        for (index, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {}", index + 1, total);
            let width = self.measure.width(&text, false, STAMP_FONT_SIZE);
            page.runs.push(TextRun {
                text,
                x: (self.layout.page_width - width) / 2.0,
                y: offset,
                size: STAMP_FONT_SIZE,
                bold: false,
            });
        }
    }
}

/// Split body text into blocks of logical lines. Blocks are separated by
/// runs of two or more newlines; whitespace-only lines stay inside their
/// block as spacers.
fn split_blocks(body: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in body.split('\n') {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}
