//! Title/body split
//!
//! Chooses the first plausible title line of the cleaned text; everything
//! else becomes the body in original order.

use crate::types::IngestedDocument;
use regex::Regex;

/// Minimum title length in characters.
const TITLE_MIN_CHARS: usize = 3;
/// A line longer than this cannot be a title.
const TITLE_MAX_CHARS: usize = 180;
/// Chosen titles are truncated to this many characters plus an ellipsis.
const TITLE_TRUNCATE_CHARS: usize = 140;

/// No line of the source qualified as a title. Callers recover with the
/// configured default title; this never escapes the crate as an error.
pub(crate) struct NoUsableTitle;

/// Split cleaned lines into a title and a body.
pub(crate) fn split_title_body(
    lines: &[String],
    stopwords: &[String],
    footer_patterns: &[Regex],
) -> Result<IngestedDocument, NoUsableTitle> {
    let title_index = lines
        .iter()
        .position(|line| is_title_candidate(line, stopwords, footer_patterns))
        .ok_or(NoUsableTitle)?;

    let title = truncate_title(lines[title_index].trim());
    let body_lines: Vec<&str> = lines
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != title_index)
        .map(|(_, line)| line.as_str())
        .collect();

    Ok(IngestedDocument {
        title,
        body: assemble_body(&body_lines),
    })
}

/// Fallback when no line qualifies: default title, whole text as body.
pub(crate) fn fallback_document(lines: &[String], default_title: &str) -> IngestedDocument {
    let body_lines: Vec<&str> = lines.iter().map(|line| line.as_str()).collect();
    IngestedDocument {
        title: default_title.to_string(),
        body: assemble_body(&body_lines),
    }
}

fn is_title_candidate(line: &str, stopwords: &[String], footer_patterns: &[Regex]) -> bool {
    let trimmed = line.trim();
    let length = trimmed.chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&length) {
        return false;
    }

    let lowered = trimmed.to_lowercase();
    if stopwords
        .iter()
        .any(|stop| stop.trim().to_lowercase() == lowered)
    {
        return false;
    }

    !footer_patterns.iter().any(|p| p.is_match(trimmed))
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= TITLE_TRUNCATE_CHARS {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(TITLE_TRUNCATE_CHARS).collect();
    truncated.push('…');
    truncated
}

/// Join body lines, collapsing runs of 3+ blank lines to a single blank line
/// and trimming blank lines at both ends.
fn assemble_body(lines: &[&str]) -> String {
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut blanks = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            blanks += 1;
            continue;
        }
        if !kept.is_empty() {
            // A run of 3+ blanks is stray vertical padding, not intent.
            let separators = if blanks >= 3 { 1 } else { blanks };
            kept.extend(std::iter::repeat_n("", separators));
        }
        blanks = 0;
        kept.push(line);
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn no_stopwords() -> Vec<String> {
        Vec::new()
    }

    fn footer_patterns() -> Vec<Regex> {
        vec![Regex::new(r"(?i)^page\s+\d+$").unwrap()]
    }

    #[test]
    fn test_first_line_becomes_title() {
        let doc = split_title_body(
            &lines(&["A Letter Home", "Dear family,", "All is well."]),
            &no_stopwords(),
            &footer_patterns(),
        )
        .unwrap_or_else(|_| panic!("title expected"));
        assert_eq!(doc.title, "A Letter Home");
        assert_eq!(doc.body, "Dear family,\nAll is well.");
    }

    #[test]
    fn test_short_and_footer_lines_skipped() {
        let doc = split_title_body(
            &lines(&["--", "Page 4", "The Actual Title", "body"]),
            &no_stopwords(),
            &footer_patterns(),
        )
        .unwrap_or_else(|_| panic!("title expected"));
        assert_eq!(doc.title, "The Actual Title");
        // Skipped lines stay in the body in original order.
        assert_eq!(doc.body, "--\nPage 4\nbody");
    }

    #[test]
    fn test_stopword_line_skipped_case_insensitively() {
        let stopwords = vec!["Draft".to_string()];
        let doc = split_title_body(
            &lines(&["  DRAFT  ", "Real Title", "body"]),
            &stopwords,
            &footer_patterns(),
        )
        .unwrap_or_else(|_| panic!("title expected"));
        assert_eq!(doc.title, "Real Title");
    }

    #[test]
    fn test_long_title_truncated_with_ellipsis() {
        let long = "x".repeat(170);
        let doc = split_title_body(&lines(&[&long]), &no_stopwords(), &footer_patterns())
            .unwrap_or_else(|_| panic!("title expected"));
        assert_eq!(doc.title.chars().count(), 141);
        assert!(doc.title.ends_with('…'));
    }

    #[test]
    fn test_line_over_max_is_not_a_title() {
        let too_long = "y".repeat(181);
        assert!(
            split_title_body(&lines(&[&too_long]), &no_stopwords(), &footer_patterns()).is_err()
        );
    }

    #[test]
    fn test_no_usable_title_falls_back() {
        let source = lines(&["--", "Page 2"]);
        let doc = fallback_document(&source, "Untitled");
        assert_eq!(doc.title, "Untitled");
        assert_eq!(doc.body, "--\nPage 2");
    }

    #[test]
    fn test_blank_runs_collapsed() {
        let doc = split_title_body(
            &lines(&["Title line", "one", "", "", "", "two", "", "three"]),
            &no_stopwords(),
            &footer_patterns(),
        )
        .unwrap_or_else(|_| panic!("title expected"));
        assert_eq!(doc.body, "one\n\ntwo\n\nthree");
    }

    #[test]
    fn test_double_blank_preserved() {
        let doc = split_title_body(
            &lines(&["Title line", "one", "", "", "two"]),
            &no_stopwords(),
            &footer_patterns(),
        )
        .unwrap_or_else(|_| panic!("title expected"));
        assert_eq!(doc.body, "one\n\n\ntwo");
    }

    #[test]
    fn test_boundary_blanks_trimmed() {
        let doc = split_title_body(
            &lines(&["Title line", "", "body", ""]),
            &no_stopwords(),
            &footer_patterns(),
        )
        .unwrap_or_else(|_| panic!("title expected"));
        assert_eq!(doc.body, "body");
    }
}
