//! Zone resolution
//!
//! Templates declare where text may go in one of two ways: named widget
//! annotations, or marker lines in the text layer (`{{title}}` on an
//! otherwise decorative page). Both are `ZoneSource`s, tried in order; the
//! first source that yields a matching region wins. A template with neither
//! falls back to margin-profile layout.

use crate::constants::MARKER_TITLE_BAND;
use crate::profiles::MarginProfile;
use crate::types::{Result, Zone};
use pdf_template::{NamedRegion, Rect, Template};

/// The title and body zones a template declares, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedZones {
    pub title: Option<Zone>,
    pub body: Option<Zone>,
}

impl ResolvedZones {
    pub fn has_title_zone(&self) -> bool {
        self.title.is_some()
    }

    pub fn has_body_zone(&self) -> bool {
        self.body.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    fn from_regions(regions: Vec<NamedRegion>) -> Self {
        let mut zones = Self::default();
        for region in regions {
            let lowered = region.name.to_lowercase();
            let slot = if lowered.contains("title") {
                &mut zones.title
            } else if lowered.contains("body") {
                &mut zones.body
            } else {
                // Decorative or image zone, not a text target.
                continue;
            };
            if slot.is_none() {
                *slot = Some(Zone {
                    name: region.name,
                    page_index: region.page_index,
                    rect: region.rect,
                });
            }
        }
        zones
    }
}

/// One way of discovering named placement regions on a template.
pub trait ZoneSource {
    fn named_regions(&self, template: &Template) -> Result<Vec<NamedRegion>>;
}

/// Declarative zones: widget annotations with a name and a rectangle.
pub struct WidgetZones;

impl ZoneSource for WidgetZones {
    fn named_regions(&self, template: &Template) -> Result<Vec<NamedRegion>> {
        Ok(template.named_regions()?)
    }
}

/// Positional zones: a text-layer line whose whole content is a marker such
/// as `{{title}}`, `[body]`, or plain `title` anchors a derived rectangle.
///
/// A bare run gives only an anchor point, so geometry is derived: both rects
/// mirror the marker's left offset on the right side; the title gets a fixed
/// band above its marker, the body runs from its marker down to the profile's
/// bottom margin.
pub struct MarkerZones<'a> {
    pub profile: &'a MarginProfile,
}

impl ZoneSource for MarkerZones<'_> {
    fn named_regions(&self, template: &Template) -> Result<Vec<NamedRegion>> {
        let mut regions = Vec::new();
        for page_index in 0..template.page_count() {
            let (page_width, _) = template.page_size(page_index)?;
            for run in template.text_runs(page_index)? {
                let Some(marker) = marker_name(&run.text) else {
                    continue;
                };
                let width = page_width - 2.0 * run.x;
                let rect = match marker {
                    "title" => Rect::new(run.x, run.y, width, MARKER_TITLE_BAND),
                    "body" => {
                        let bottom = self.profile.bottom_pt;
                        Rect::new(run.x, bottom, width, run.y - bottom)
                    }
                    _ => unreachable!(),
                };
                regions.push(NamedRegion {
                    name: marker.to_string(),
                    page_index,
                    rect,
                });
            }
        }
        Ok(regions)
    }
}

/// Strip optional `{…}`, `{{…}}`, `[…]`, or `<…>` wrappers and match the
/// remainder against the marker keywords.
fn marker_name(text: &str) -> Option<&'static str> {
    let mut inner = text.trim();
    loop {
        let stripped = inner
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .or_else(|| inner.strip_prefix('[').and_then(|s| s.strip_suffix(']')))
            .or_else(|| inner.strip_prefix('<').and_then(|s| s.strip_suffix('>')));
        match stripped {
            Some(s) => inner = s.trim(),
            None => break,
        }
    }
    if inner.eq_ignore_ascii_case("title") {
        Some("title")
    } else if inner.eq_ignore_ascii_case("body") {
        Some("body")
    } else {
        None
    }
}

/// Resolve a template's title and body zones.
///
/// Widget annotations are authoritative when any of them match; the marker
/// scan only runs for templates without matching widgets.
pub fn resolve_zones(template: &Template, profile: &MarginProfile) -> Result<ResolvedZones> {
    let sources: [&dyn ZoneSource; 2] = [&WidgetZones, &MarkerZones { profile }];
    for source in sources {
        let zones = ResolvedZones::from_regions(source.named_regions(template)?);
        if !zones.is_empty() {
            return Ok(zones);
        }
    }
    Ok(ResolvedZones::default())
}
