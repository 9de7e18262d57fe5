//! Cross-page boilerplate detection
//!
//! A line of template furniture (letterhead slogans, legal footers) repeats
//! on a large share of a document's pages; authored content does not. Lines
//! are keyed lowercased and trimmed, each page contributing each distinct
//! line at most once.

use std::collections::{HashMap, HashSet};

/// Number of pages a line must appear on before it counts as boilerplate.
pub(crate) fn page_threshold(page_count: usize, ratio: f32) -> usize {
    ((page_count as f32 * ratio).ceil() as usize).max(2)
}

/// Keys of lines that repeat on at least the threshold number of pages.
pub(crate) fn boilerplate_keys(pages: &[Vec<String>], ratio: f32) -> HashSet<String> {
    let mut page_counts: HashMap<String, usize> = HashMap::new();
    for page in pages {
        let distinct: HashSet<String> = page.iter().filter_map(|line| line_key(line)).collect();
        for key in distinct {
            *page_counts.entry(key).or_insert(0) += 1;
        }
    }

    let threshold = page_threshold(pages.len(), ratio);
    page_counts
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(key, _)| key)
        .collect()
}

/// Drop every occurrence of a boilerplate line from every page.
pub(crate) fn strip_boilerplate(pages: Vec<Vec<String>>, ratio: f32) -> Vec<Vec<String>> {
    let keys = boilerplate_keys(&pages, ratio);
    if keys.is_empty() {
        return pages;
    }

    pages
        .into_iter()
        .map(|page| {
            page.into_iter()
                .filter(|line| line_key(line).is_none_or(|key| !keys.contains(&key)))
                .collect()
        })
        .collect()
}

fn line_key(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
