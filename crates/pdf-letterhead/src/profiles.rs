//! Margin profiles
//!
//! Zone-less templates fall back to margin-based layout. Margins differ per
//! template, so they are a declarative table keyed by template identity with
//! an explicit default, not string-matching buried in the layout code.

use crate::constants::{DEFAULT_MARGIN, TITLE_BAND_HEIGHT};
use crate::types::{GenerateError, Result};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Margin-based layout parameters for one template.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginProfile {
    pub left_pt: f32,
    pub right_pt: f32,
    pub top_pt: f32,
    pub bottom_pt: f32,
    /// Height reserved for the title at the top of the content area.
    pub title_band_pt: f32,
}

impl Default for MarginProfile {
    fn default() -> Self {
        Self {
            left_pt: DEFAULT_MARGIN,
            right_pt: DEFAULT_MARGIN,
            top_pt: DEFAULT_MARGIN,
            bottom_pt: DEFAULT_MARGIN,
            title_band_pt: TITLE_BAND_HEIGHT,
        }
    }
}

impl MarginProfile {
    pub fn validate(&self) -> Result<()> {
        if self.left_pt < 0.0 || self.right_pt < 0.0 || self.top_pt < 0.0 || self.bottom_pt < 0.0 {
            return Err(GenerateError::Config(
                "Margins must not be negative".to_string(),
            ));
        }
        if self.title_band_pt < 0.0 {
            return Err(GenerateError::Config(
                "Title band must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-template margin overrides with an explicit default.
///
/// Lookup uses the caller-supplied template id (or the template's `/Info`
/// title as a fallback identity); unrecognized templates get the default
/// profile.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarginProfiles {
    pub default: MarginProfile,
    pub overrides: HashMap<String, MarginProfile>,
}

impl MarginProfiles {
    /// The profile for a template identity, or the default when the identity
    /// is unknown or absent.
    pub fn profile_for(&self, template_id: Option<&str>) -> &MarginProfile {
        template_id
            .and_then(|id| self.overrides.get(id))
            .unwrap_or(&self.default)
    }

    /// Load profiles from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let profiles = serde_json::from_slice(&bytes)
            .map_err(|e| GenerateError::Config(format!("Failed to parse profiles: {}", e)))?;
        Ok(profiles)
    }

    /// Save profiles to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| GenerateError::Config(format!("Failed to serialize profiles: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.default.validate()?;
        for profile in self.overrides.values() {
            profile.validate()?;
        }
        Ok(())
    }
}
