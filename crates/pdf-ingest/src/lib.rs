//! Source-document ingestion
//!
//! Turns plain text, HTML, or a rendered PDF into a clean `{title, body}`
//! pair: rows are assembled from the positional text layer, repeating
//! template furniture is stripped, and the first plausible line becomes the
//! title. Single newlines in the body are intentional line breaks; blank
//! lines separate paragraphs.

mod boilerplate;
mod html;
mod options;
mod rows;
mod split;
mod types;

pub use options::IngestOptions;
pub use types::{IngestError, IngestedDocument, Result, SourceFormat};

use pdf_template::Template;
use std::path::Path;

/// Ingest a source document into a title and a body.
pub fn ingest(
    bytes: &[u8],
    format: SourceFormat,
    options: &IngestOptions,
) -> Result<IngestedDocument> {
    options.validate()?;

    let pages: Vec<Vec<String>> = match format {
        SourceFormat::Text => vec![text_lines(&decode_text(bytes))],
        SourceFormat::Html => {
            let text = html::html_to_text(&decode_text(bytes));
            vec![text_lines(&text)]
        }
        SourceFormat::Pdf => pdf_pages(bytes, options)?,
    };

    let cleaned = boilerplate::strip_boilerplate(pages, options.boilerplate_page_ratio);
    let lines: Vec<String> = join_pages(cleaned);

    let footer_patterns = options.compiled_footer_patterns()?;
    match split::split_title_body(&lines, &options.stopwords, &footer_patterns) {
        Ok(document) => Ok(document),
        Err(split::NoUsableTitle) => {
            log::warn!(
                "no usable title line found, falling back to {:?}",
                options.default_title
            );
            Ok(split::fallback_document(&lines, &options.default_title))
        }
    }
}

/// Ingest a file, choosing the format from its extension.
pub async fn ingest_file(
    path: impl AsRef<Path>,
    options: &IngestOptions,
) -> Result<IngestedDocument> {
    let path = path.as_ref().to_owned();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| IngestError::UnsupportedFormat(path.display().to_string()))?;
    let format = SourceFormat::from_extension(extension)?;

    let bytes = tokio::fs::read(&path).await?;
    let options = options.clone();
    tokio::task::spawn_blocking(move || ingest(&bytes, format, &options)).await?
}

/// Decode source bytes as UTF-8, tolerating stray bytes and a leading BOM.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Split normalized text into lines, as one ingestion "page".
fn text_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(|line| line.to_string())
        .collect()
}

/// Assemble the per-page row lists of a PDF source.
fn pdf_pages(bytes: &[u8], options: &IngestOptions) -> Result<Vec<Vec<String>>> {
    let template = Template::from_bytes(bytes)?;
    let mut pages = Vec::with_capacity(template.page_count());
    for index in 0..template.page_count() {
        let (_, page_height) = template.page_size(index)?;
        let runs = template.text_runs(index)?;
        pages.push(rows::page_rows(&runs, page_height, options));
    }
    Ok(pages)
}

/// Concatenate pages into one line list, with a blank line at each page
/// boundary so page breaks read as paragraph breaks.
fn join_pages(pages: Vec<Vec<String>>) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, page) in pages.into_iter().enumerate() {
        if index > 0 && !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(page);
    }
    lines
}
