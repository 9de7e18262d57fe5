use crate::types::{IngestError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ingestion configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IngestOptions {
    /// Lines that may never become the title (compared case- and
    /// whitespace-insensitively against the whole line).
    pub stopwords: Vec<String>,

    /// Regex patterns for footer furniture (page numbers, copyright lines).
    /// A matching line is never chosen as the title.
    pub footer_patterns: Vec<String>,

    /// Height of the band below the page top whose rows are discarded
    /// during positional ingestion (points).
    pub header_band_pt: f32,

    /// Height of the band above the page bottom whose rows are discarded
    /// during positional ingestion (points).
    pub footer_band_pt: f32,

    /// A line present on at least `max(2, ceil(ratio × pages))` pages is
    /// treated as template boilerplate and dropped everywhere.
    pub boilerplate_page_ratio: f32,

    /// Title used when no line of the source qualifies.
    pub default_title: String,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            stopwords: vec![
                "draft".to_string(),
                "confidential".to_string(),
                "internal use only".to_string(),
            ],
            footer_patterns: vec![
                r"(?i)^page\s+\d+(\s+of\s+\d+)?$".to_string(),
                r"^-?\s*\d+(\s*/\s*\d+)?\s*-?$".to_string(),
                r"(?i)^(copyright|©|\(c\)).*\d{4}".to_string(),
            ],
            header_band_pt: 40.0,
            footer_band_pt: 40.0,
            boilerplate_page_ratio: 0.4,
            default_title: "Untitled".to_string(),
        }
    }
}

impl IngestOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| IngestError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| IngestError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !(self.boilerplate_page_ratio > 0.0 && self.boilerplate_page_ratio <= 1.0) {
            return Err(IngestError::Config(
                "Boilerplate page ratio must be in (0, 1]".to_string(),
            ));
        }
        if self.header_band_pt < 0.0 || self.footer_band_pt < 0.0 {
            return Err(IngestError::Config(
                "Header/footer bands must not be negative".to_string(),
            ));
        }
        self.compiled_footer_patterns()?;
        Ok(())
    }

    /// Compile the footer patterns, surfacing bad regexes as a config error.
    pub(crate) fn compiled_footer_patterns(&self) -> Result<Vec<regex::Regex>> {
        self.footer_patterns
            .iter()
            .map(|p| {
                regex::Regex::new(p)
                    .map_err(|e| IngestError::Config(format!("Bad footer pattern {p:?}: {e}")))
            })
            .collect()
    }
}
