//! Row assembly for positional text layers
//!
//! Text runs arrive with baseline coordinates. Runs that share a baseline
//! (after rounding) belong to one visual row and are concatenated
//! left-to-right. Rows inside the configured header/footer bands are page
//! furniture by position and never reach the content pipeline.

use crate::options::IngestOptions;
use pdf_template::PositionedText;
use std::collections::BTreeMap;

/// Assemble the rows of one page, top to bottom.
pub(crate) fn page_rows(
    runs: &[PositionedText],
    page_height: f32,
    options: &IngestOptions,
) -> Vec<String> {
    let header_floor = page_height - options.header_band_pt;
    let footer_ceiling = options.footer_band_pt;

    let mut rows: BTreeMap<i64, Vec<&PositionedText>> = BTreeMap::new();
    for run in runs {
        // Strictly inside a band: a zero-height band drops nothing, not even
        // runs sitting exactly on the page edge.
        if run.y > header_floor || run.y < footer_ceiling {
            continue;
        }
        rows.entry(run.y.round() as i64).or_default().push(run);
    }

    rows.into_iter()
        .rev()
        .map(|(_, mut row)| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            let mut text = String::new();
            for run in row {
                text.push_str(&run.text);
            }
            text
        })
        .collect()
}
