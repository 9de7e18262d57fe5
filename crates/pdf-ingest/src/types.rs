use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),
    #[error("Template error: {0}")]
    Template(#[from] pdf_template::TemplateError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, IngestError>;

/// Declared format of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Plain UTF-8 text.
    Text,
    /// HTML rich text.
    Html,
    /// A rendered PDF with a positional text layer.
    Pdf,
}

impl SourceFormat {
    /// Map a file extension to a source format.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "html" | "htm" => Ok(Self::Html),
            "pdf" => Ok(Self::Pdf),
            other => Err(IngestError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// The cleaned result of ingesting a source document.
///
/// `body` keeps single newlines as intentional line breaks; runs of two or
/// more newlines separate paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedDocument {
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_extension("TXT").unwrap(), SourceFormat::Text);
        assert_eq!(SourceFormat::from_extension("htm").unwrap(), SourceFormat::Html);
        assert_eq!(SourceFormat::from_extension("pdf").unwrap(), SourceFormat::Pdf);
    }

    #[test]
    fn test_format_unknown_extension() {
        match SourceFormat::from_extension("docx") {
            Err(IngestError::UnsupportedFormat(ext)) => assert_eq!(ext, "docx"),
            other => panic!("Expected UnsupportedFormat, got {other:?}"),
        }
    }
}
