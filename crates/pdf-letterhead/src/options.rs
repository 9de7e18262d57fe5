use crate::constants::{
    BODY_FONT_SIZE, BODY_LEADING, DEFAULT_MAX_PAGES, TITLE_FONT_SIZE, TITLE_LEADING, ZONE_PADDING,
};
use crate::profiles::MarginProfiles;
use crate::types::{GenerateError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerateOptions {
    // Type
    pub title_font_size: f32,
    pub body_font_size: f32,
    pub title_leading: f32,
    pub body_leading: f32,

    // Placement
    pub zone_padding: f32,
    pub margin_profiles: MarginProfiles,

    /// Identity used to pick a margin profile; falls back to the template's
    /// `/Info` title when absent.
    pub template_id: Option<String>,

    // Page-number stamps
    pub stamp_page_numbers: bool,

    // Guard rail
    pub max_pages: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            title_font_size: TITLE_FONT_SIZE,
            body_font_size: BODY_FONT_SIZE,
            title_leading: TITLE_LEADING,
            body_leading: BODY_LEADING,
            zone_padding: ZONE_PADDING,
            margin_profiles: MarginProfiles::default(),
            template_id: None,
            stamp_page_numbers: true,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl GenerateOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| GenerateError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| GenerateError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.title_font_size <= 0.0 || self.body_font_size <= 0.0 {
            return Err(GenerateError::Config(
                "Font sizes must be positive".to_string(),
            ));
        }
        if self.title_leading < self.title_font_size || self.body_leading < self.body_font_size {
            return Err(GenerateError::Config(
                "Leading must be at least the font size".to_string(),
            ));
        }
        if self.zone_padding < 0.0 {
            return Err(GenerateError::Config(
                "Zone padding must not be negative".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(GenerateError::Config(
                "Page limit must be at least 1".to_string(),
            ));
        }
        self.margin_profiles.validate()
    }
}
