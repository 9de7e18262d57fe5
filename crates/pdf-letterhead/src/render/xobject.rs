//! Template pages as Form XObjects
//!
//! A template page's artwork is turned into a Form XObject once and placed
//! at identity transform on every output page that uses it. Resources are
//! deep-copied into the output document through an object cache so shared
//! objects (fonts, images) are copied once.

use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Object-id mapping from the template document into the output document.
pub(crate) type CopyCache = HashMap<ObjectId, ObjectId>;

/// Build a Form XObject from a template page.
pub(crate) fn page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut CopyCache,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let bbox = page_dict
        .get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .cloned()
        .unwrap_or_else(|_| {
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]
        });

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Form".to_vec()));
    dict.set("FormType", Object::Integer(1));
    dict.set("BBox", Object::Array(bbox));
    if let Ok(resources) = page_dict.get(b"Resources") {
        dict.set("Resources", deep_copy(output, source, resources, cache)?);
    }

    let content = page_content(source, page_dict)?;
    Ok(output.add_object(Stream::new(dict, content)))
}

/// Concatenated, decompressed content stream bytes of a page.
fn page_content(source: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(Vec::new());
    };

    let mut data = Vec::new();
    match contents {
        Object::Reference(id) => append_stream(source, *id, &mut data)?,
        Object::Array(parts) => {
            for part in parts {
                if let Object::Reference(id) = part {
                    append_stream(source, *id, &mut data)?;
                    data.push(b'\n');
                }
            }
        }
        _ => {}
    }
    Ok(data)
}

fn append_stream(source: &Document, id: ObjectId, out: &mut Vec<u8>) -> Result<()> {
    if let Ok(stream) = source.get_object(id)?.as_stream() {
        let content = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        out.extend_from_slice(&content);
    }
    Ok(())
}

/// Bring one object over from the template document. References resolve
/// through the cache, so a font or image reachable from several pages is
/// materialized in the output exactly once; everything else copies by value
/// with its children rewritten.
pub(crate) fn deep_copy(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut CopyCache,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            let mapped = match cache.get(id) {
                Some(&mapped) => mapped,
                None => {
                    let copied = deep_copy(output, source, source.get_object(*id)?, cache)?;
                    let mapped = output.add_object(copied);
                    cache.insert(*id, mapped);
                    mapped
                }
            };
            Ok(Object::Reference(mapped))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dict(output, source, dict, cache)?)),
        Object::Array(items) => {
            let mut copied = Vec::with_capacity(items.len());
            for item in items {
                copied.push(deep_copy(output, source, item, cache)?);
            }
            Ok(Object::Array(copied))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dict(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        _ => Ok(obj.clone()),
    }
}

fn copy_dict(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut CopyCache,
) -> Result<Dictionary> {
    let mut copied = Dictionary::new();
    for (key, value) in dict.iter() {
        copied.set(key.clone(), deep_copy(output, source, value, cache)?);
    }
    Ok(copied)
}
