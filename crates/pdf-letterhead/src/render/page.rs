//! Output page assembly
//!
//! Builds each output page as a fresh page dictionary: the template page's
//! XObject placed at identity transform, followed by the plan's text runs as
//! plain `BT..ET` operators. Text is encoded as WinAnsi with `?` for
//! unmappable characters. Output is deterministic for identical inputs.

use super::xobject::{CopyCache, page_xobject};
use crate::types::{RenderPlan, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_template::Template;
use std::collections::HashMap;

/// Serialize a render plan over its template into PDF bytes.
pub(crate) fn assemble(template: &Template, plan: &RenderPlan) -> Result<Vec<u8>> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();

    let regular_font_id = output.add_object(standard_font(b"Helvetica"));
    let bold_font_id = output.add_object(standard_font(b"Helvetica-Bold"));

    // Template objects copied once, shared by every page that needs them.
    let mut copy_cache: CopyCache = HashMap::new();
    let mut xobject_ids: HashMap<usize, ObjectId> = HashMap::new();

    let mut page_refs = Vec::with_capacity(plan.pages.len());
    for page_plan in &plan.pages {
        let template_page = page_plan.template_page;
        let xobject_id = match xobject_ids.get(&template_page) {
            Some(&id) => id,
            None => {
                let id = page_xobject(
                    &mut output,
                    template.document(),
                    template.page_id(template_page)?,
                    &mut copy_cache,
                )?;
                xobject_ids.insert(template_page, id);
                id
            }
        };

        let (width, height) = template.page_size(template_page)?;

        let mut ops = String::from("q /Bg Do Q\n");
        for run in &page_plan.runs {
            let font = if run.bold { "F2" } else { "F1" };
            ops.push_str(&format!(
                "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
                font,
                run.size,
                run.x,
                run.y,
                escape_text(&run.text)
            ));
        }
        let content_id = output.add_object(Stream::new(Dictionary::new(), ops.into_bytes()));

        let xobjects = Dictionary::from_iter(vec![("Bg", Object::Reference(xobject_id))]);
        let fonts = Dictionary::from_iter(vec![
            ("F1", Object::Reference(regular_font_id)),
            ("F2", Object::Reference(bold_font_id)),
        ]);
        let resources = Dictionary::from_iter(vec![
            ("XObject", Object::Dictionary(xobjects)),
            ("Font", Object::Dictionary(fonts)),
        ]);

        let page_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_tree_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width),
                    Object::Real(height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
            ("Resources", Object::Dictionary(resources)),
        ]);
        page_refs.push(Object::Reference(output.add_object(page_dict)));
    }

    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    output.save_to(&mut bytes)?;
    Ok(bytes)
}

fn standard_font(base_font: &[u8]) -> Dictionary {
    Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(base_font.to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ])
}

/// Encode text for a literal string operand: WinAnsi bytes with delimiters
/// escaped and unmappable characters replaced by `?`.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        let byte = winansi_byte(c);
        match byte {
            b'(' => escaped.push_str("\\("),
            b')' => escaped.push_str("\\)"),
            b'\\' => escaped.push_str("\\\\"),
            0x20..=0x7E => escaped.push(byte as char),
            _ => escaped.push_str(&format!("\\{byte:03o}")),
        }
    }
    escaped
}

fn winansi_byte(c: char) -> u8 {
    match c {
        '\u{20}'..='\u{7E}' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}
