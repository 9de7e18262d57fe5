//! Shared layout constants
//!
//! Central home for the magic numbers of text placement.

// =============================================================================
// Fonts and Leading
// =============================================================================

/// Default title font size (points)
pub const TITLE_FONT_SIZE: f32 = 18.0;

/// Default body font size (points)
pub const BODY_FONT_SIZE: f32 = 11.0;

/// Default title line height (points)
pub const TITLE_LEADING: f32 = 22.0;

/// Default body line height (points)
pub const BODY_LEADING: f32 = 14.0;

// =============================================================================
// Zones and Margins
// =============================================================================

/// Inset between a zone edge and its text (points)
pub const ZONE_PADDING: f32 = 4.0;

/// Default page margin for templates without zones (points)
pub const DEFAULT_MARGIN: f32 = 56.0;

/// Height reserved for the title at the top of the content area when no
/// title zone exists (points)
pub const TITLE_BAND_HEIGHT: f32 = 64.0;

/// Height of the band derived around a positional title marker (points)
pub const MARKER_TITLE_BAND: f32 = 48.0;

// =============================================================================
// Page-Number Stamps
// =============================================================================

/// Font size for "Page i of N" stamps (points)
pub const STAMP_FONT_SIZE: f32 = 8.0;

/// Stamp baseline offset from the page bottom under zone layout (points)
pub const STAMP_OFFSET_ZONE: f32 = 16.0;

/// Stamp baseline offset from the page bottom under margin layout (points)
pub const STAMP_OFFSET_MARGIN: f32 = 30.0;

// =============================================================================
// Guard Rails
// =============================================================================

/// Default ceiling on generated pages
pub const DEFAULT_MAX_PAGES: usize = 50;
