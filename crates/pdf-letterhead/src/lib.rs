//! Template-anchored text flow
//!
//! Flows a title and an arbitrary-length body onto a letterhead template,
//! cloning the template's first page for as many overflow pages as the text
//! needs:
//! 1. Resolve placement zones (widget annotations, text-layer markers, or
//!    margin-profile fallback)
//! 2. Wrap and paginate the text into a render plan
//! 3. Serialize template artwork plus placed text into output bytes
//!
//! Everything is built fresh per request; a `Template` is never mutated, so
//! one loaded template can back concurrent generations.

pub mod constants;
pub mod flow;
mod io;
mod metrics;
mod options;
mod profiles;
mod protect;
mod render;
mod types;
mod zones;

pub use io::{load_template, save_document};
pub use metrics::{BuiltinMetrics, GlyphMeasure};
pub use options::GenerateOptions;
pub use profiles::{MarginProfile, MarginProfiles};
pub use protect::{NoProtection, RightsProtector};
pub use types::*;
pub use zones::{MarkerZones, ResolvedZones, WidgetZones, ZoneSource, resolve_zones};

use flow::PageLayout;
use pdf_template::{Rect, Template};

/// Generate a document from a title and body over a template.
pub async fn generate(
    title: &str,
    body: &str,
    template: &Template,
    options: &GenerateOptions,
) -> Result<Vec<u8>> {
    let title = title.to_owned();
    let body = body.to_owned();
    let template = template.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || generate_sync(&title, &body, &template, &options)).await?
}

/// Generate and then run the result through a rights-protection service.
pub async fn generate_protected(
    title: &str,
    body: &str,
    template: &Template,
    options: &GenerateOptions,
    protector: &dyn RightsProtector,
) -> Result<Vec<u8>> {
    let bytes = generate(title, body, template, options).await?;
    protector.protect(bytes).await
}

/// Synchronous generation with the built-in Helvetica metrics.
pub fn generate_sync(
    title: &str,
    body: &str,
    template: &Template,
    options: &GenerateOptions,
) -> Result<Vec<u8>> {
    generate_sync_with(title, body, template, options, &BuiltinMetrics)
}

/// Synchronous generation with a caller-supplied glyph measure.
pub fn generate_sync_with(
    title: &str,
    body: &str,
    template: &Template,
    options: &GenerateOptions,
    measure: &dyn GlyphMeasure,
) -> Result<Vec<u8>> {
    let plan = plan_sync(title, body, template, options, measure)?;
    render::assemble(template, &plan)
}

/// Compute the render plan without serializing it.
pub fn plan_sync(
    title: &str,
    body: &str,
    template: &Template,
    options: &GenerateOptions,
    measure: &dyn GlyphMeasure,
) -> Result<RenderPlan> {
    options.validate()?;

    let identity = options
        .template_id
        .clone()
        .or_else(|| template.info_title());
    let profile = options.margin_profiles.profile_for(identity.as_deref());

    let zones = resolve_zones(template, profile)?;
    let layout = build_layout(template, &zones, profile, title, options)?;
    flow::layout_text(title, body, &layout, options, measure)
}

/// Turn resolved zones (or their absence) into the page geometry the flow
/// pass runs against.
fn build_layout(
    template: &Template,
    zones: &ResolvedZones,
    profile: &MarginProfile,
    title: &str,
    options: &GenerateOptions,
) -> Result<PageLayout> {
    let (page_width, page_height) = template.page_size(0)?;
    let content = Rect::new(
        profile.left_pt,
        profile.bottom_pt,
        page_width - profile.left_pt - profile.right_pt,
        page_height - profile.top_pt - profile.bottom_pt,
    );

    let has_title_text = !title.trim().is_empty();
    let zone_layout = !zones.is_empty();

    if !zone_layout && (content.width <= 0.0 || content.height <= 0.0) {
        return Err(GenerateError::Config(
            "Margin profile leaves no content area".to_string(),
        ));
    }

    for zone in [&zones.title, &zones.body].into_iter().flatten() {
        if zone.rect.width <= 0.0 || zone.rect.height <= 0.0 {
            return Err(GenerateError::DegenerateZone {
                name: zone.name.clone(),
                page_index: zone.page_index,
            });
        }
    }

    let layout = match (&zones.title, &zones.body) {
        (Some(title_zone), Some(body_zone)) => {
            // Later pages reclaim the title's vertical space; the width stays
            // the body zone's so wrapping is stable across pages.
            let top = title_zone.rect.top().max(body_zone.rect.top());
            let later = Rect::new(
                body_zone.rect.x,
                body_zone.rect.y,
                body_zone.rect.width,
                top - body_zone.rect.y,
            );
            PageLayout {
                page_width,
                page_height,
                template_pages: template.page_count(),
                title: has_title_text.then_some(title_zone.rect),
                first_body: body_zone.rect,
                later_body: later,
                zone_layout: true,
            }
        }
        (None, Some(body_zone)) => {
            // No declared title zone: carve a band from the top of the body
            // zone on the first page.
            let first = if has_title_text {
                shrink_top(body_zone.rect, profile.title_band_pt)
            } else {
                body_zone.rect
            };
            PageLayout {
                page_width,
                page_height,
                template_pages: template.page_count(),
                title: has_title_text.then(|| top_band(body_zone.rect, profile.title_band_pt)),
                first_body: first,
                later_body: body_zone.rect,
                zone_layout: true,
            }
        }
        (Some(title_zone), None) => {
            // Title zone without a body zone: body uses the margin content
            // area, kept clear of the title zone on the first page.
            let first_top = content.top().min(title_zone.rect.y);
            let first = Rect::new(
                content.x,
                content.y,
                content.width,
                (first_top - content.y).max(0.0),
            );
            PageLayout {
                page_width,
                page_height,
                template_pages: template.page_count(),
                title: has_title_text.then_some(title_zone.rect),
                first_body: first,
                later_body: content,
                zone_layout: true,
            }
        }
        (None, None) => {
            let first = if has_title_text {
                shrink_top(content, profile.title_band_pt)
            } else {
                content
            };
            PageLayout {
                page_width,
                page_height,
                template_pages: template.page_count(),
                title: has_title_text.then(|| top_band(content, profile.title_band_pt)),
                first_body: first,
                later_body: content,
                zone_layout: false,
            }
        }
    };

    Ok(layout)
}

/// The top `band` of a rectangle.
fn top_band(rect: Rect, band: f32) -> Rect {
    let band = band.min(rect.height);
    Rect::new(rect.x, rect.top() - band, rect.width, band)
}

/// A rectangle with its top `band` removed.
fn shrink_top(rect: Rect, band: f32) -> Rect {
    let band = band.min(rect.height);
    Rect::new(rect.x, rect.y, rect.width, rect.height - band)
}
