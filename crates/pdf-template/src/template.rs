//! Template document model
//!
//! A template is an existing PDF whose pages supply the background artwork
//! for generated documents. This module exposes the pieces the layout engine
//! needs: page count, page geometry, named widget regions, and the text layer.

use crate::textops::{self, decode_pdf_string};
use crate::types::{NamedRegion, PositionedText, Rect, Result, TemplateError};
use lopdf::{Document, Object, ObjectId};

/// Fallback page size in points (US Letter) when a page has no usable MediaBox.
const DEFAULT_PAGE_SIZE_PT: (f32, f32) = (612.0, 792.0);

/// An opened template document.
///
/// Wraps the parsed PDF together with its page list in document order. The
/// template is never mutated; generation builds a fresh output document, so a
/// `Template` value can back any number of requests.
#[derive(Debug, Clone)]
pub struct Template {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl Template {
    /// Parse a template from raw PDF bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let document = Document::load_mem(bytes)?;
        Self::from_document(document)
    }

    /// Wrap an already-parsed document.
    pub fn from_document(document: Document) -> Result<Self> {
        let page_ids: Vec<ObjectId> = document.get_pages().values().copied().collect();
        if page_ids.is_empty() {
            return Err(TemplateError::NoPages);
        }
        Ok(Self { document, page_ids })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Page object ids in document order.
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or(TemplateError::MissingPage(index))
    }

    /// Page width and height in points, from the page's MediaBox.
    pub fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        let page_dict = self.document.get_dictionary(self.page_id(index)?)?;
        let corners: Vec<f32> = match page_dict.get(b"MediaBox").and_then(|obj| obj.as_array()) {
            Ok(mb) => mb.iter().filter_map(number).collect(),
            Err(_) => Vec::new(),
        };
        if corners.len() == 4 {
            Ok((
                (corners[2] - corners[0]).abs(),
                (corners[3] - corners[1]).abs(),
            ))
        } else {
            Ok(DEFAULT_PAGE_SIZE_PT)
        }
    }

    /// Named widget regions declared on the template's pages.
    ///
    /// Reads each page's `/Annots` array and keeps `/Widget` entries that
    /// carry both a name (`/T`) and a rectangle (`/Rect`). Rectangle corners
    /// are normalized, so authoring order does not matter. Malformed entries
    /// are skipped.
    pub fn named_regions(&self) -> Result<Vec<NamedRegion>> {
        let mut regions = Vec::new();

        for (page_index, &page_id) in self.page_ids.iter().enumerate() {
            let page_dict = self.document.get_dictionary(page_id)?;
            let Ok(annots) = page_dict.get(b"Annots") else {
                continue;
            };
            let Some(entries) = self.as_array(annots) else {
                continue;
            };

            for entry in entries {
                let dict = match entry {
                    Object::Reference(id) => match self.document.get_dictionary(*id) {
                        Ok(dict) => dict,
                        Err(_) => {
                            log::debug!("skipping unresolvable annotation on page {page_index}");
                            continue;
                        }
                    },
                    Object::Dictionary(dict) => dict,
                    _ => continue,
                };

                match dict.get(b"Subtype") {
                    Ok(Object::Name(subtype)) if subtype == b"Widget" => {}
                    _ => continue,
                }
                let Ok(Object::String(name_bytes, _)) = dict.get(b"T") else {
                    continue;
                };
                let Some(rect) = dict.get(b"Rect").ok().and_then(|obj| self.rect_of(obj))
                else {
                    log::debug!("widget on page {page_index} has no usable rect");
                    continue;
                };

                regions.push(NamedRegion {
                    name: decode_pdf_string(name_bytes),
                    page_index,
                    rect,
                });
            }
        }

        Ok(regions)
    }

    /// Text runs on one page, anchored at their line origins.
    pub fn text_runs(&self, index: usize) -> Result<Vec<PositionedText>> {
        textops::page_text_runs(&self.document, self.page_id(index)?)
    }

    /// The document's `/Info /Title`, used as a template identity fallback.
    pub fn info_title(&self) -> Option<String> {
        let info = self.document.trailer.get(b"Info").ok()?;
        let dict = match info {
            Object::Reference(id) => self.document.get_dictionary(*id).ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };
        match dict.get(b"Title") {
            Ok(Object::String(bytes, _)) => Some(decode_pdf_string(bytes)),
            _ => None,
        }
    }

    /// The underlying parsed document (read-only).
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn as_array<'a>(&'a self, obj: &'a Object) -> Option<&'a Vec<Object>> {
        match obj {
            Object::Array(arr) => Some(arr),
            Object::Reference(id) => self.document.get_object(*id).ok()?.as_array().ok(),
            _ => None,
        }
    }

    fn rect_of(&self, obj: &Object) -> Option<Rect> {
        let arr = self.as_array(obj)?;
        let corners: Vec<f32> = arr.iter().filter_map(number).collect();
        if corners.len() == 4 {
            Some(Rect::from_corners(
                corners[0], corners[1], corners[2], corners[3],
            ))
        } else {
            None
        }
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
