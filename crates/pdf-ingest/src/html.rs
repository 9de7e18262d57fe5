//! HTML to plain text
//!
//! A deliberately small tag scanner, not a DOM: block-level tags become
//! newlines, `script`/`style` content is dropped, and entities are decoded.
//! That is all the title/body split needs from rich text.

/// Tags that end a visual line when they open.
const BLOCK_TAGS: &[&str] = &[
    "p", "br", "div", "li", "tr", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "ul", "ol", "table",
];

/// Tags whose entire content is invisible.
const SKIPPED_TAGS: &[&str] = &["script", "style"];

/// Strip tags and decode entities, mapping block boundaries to newlines.
pub(crate) fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    let mut skip_until: Option<String> = None;

    while let Some(open) = rest.find('<') {
        let (before, tagged) = rest.split_at(open);
        if skip_until.is_none() {
            text.push_str(&html_escape::decode_html_entities(before));
        }

        let Some(close) = tagged.find('>') else {
            // Unterminated tag: treat the remainder as text.
            if skip_until.is_none() {
                text.push_str(&html_escape::decode_html_entities(tagged));
            }
            return normalize(&text);
        };
        let tag = &tagged[1..close];
        rest = &tagged[close + 1..];

        let name = tag_name(tag);
        match &skip_until {
            Some(waiting) => {
                if tag.starts_with('/') && name == *waiting {
                    skip_until = None;
                }
            }
            None => {
                if SKIPPED_TAGS.contains(&name.as_str()) && !tag.ends_with('/') {
                    skip_until = Some(name);
                } else if BLOCK_TAGS.contains(&name.as_str()) {
                    text.push('\n');
                    // A paragraph boundary separates blocks; a line break does not.
                    if name == "p" && tag.starts_with('/') {
                        text.push('\n');
                    }
                }
            }
        }
    }

    if skip_until.is_none() {
        text.push_str(&html_escape::decode_html_entities(rest));
    }
    normalize(&text)
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Trim trailing space noise per line without disturbing line structure.
fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
