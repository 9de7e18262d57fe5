//! Text-layer extraction from page content streams
//!
//! Walks the text operators of a page's content and records each shown string
//! at its current line origin. Only translations are tracked; rotated or
//! scaled text matrices are beyond what positional ingestion needs.

use crate::types::{PositionedText, Result};
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Kern adjustments in a TJ array at or beyond this magnitude (thousandths of
/// an em) stand in for a word gap.
const TJ_SPACE_THRESHOLD: f32 = -180.0;

/// Extract the positioned text runs of one page.
pub(crate) fn page_text_runs(doc: &Document, page_id: ObjectId) -> Result<Vec<PositionedText>> {
    let page_dict = doc.get_dictionary(page_id)?;
    let data = page_content(doc, page_dict)?;
    let content = match Content::decode(&data) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("skipping undecodable content stream: {e}");
            return Ok(Vec::new());
        }
    };

    let mut runs: Vec<PositionedText> = Vec::new();
    let mut line_x = 0.0_f32;
    let mut line_y = 0.0_f32;
    let mut leading = 0.0_f32;

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "BT" => {
                line_x = 0.0;
                line_y = 0.0;
            }
            "TL" => {
                if let Some(l) = operand_number(operands, 0) {
                    leading = l;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) =
                    (operand_number(operands, 0), operand_number(operands, 1))
                {
                    line_x += tx;
                    line_y += ty;
                }
            }
            "TD" => {
                // Same as Td, but also sets the leading to -ty.
                if let (Some(tx), Some(ty)) =
                    (operand_number(operands, 0), operand_number(operands, 1))
                {
                    leading = -ty;
                    line_x += tx;
                    line_y += ty;
                }
            }
            "Tm" => {
                if let (Some(e), Some(f)) =
                    (operand_number(operands, 4), operand_number(operands, 5))
                {
                    line_x = e;
                    line_y = f;
                }
            }
            "T*" => line_y -= leading,
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push_run(&mut runs, line_x, line_y, decode_pdf_string(bytes));
                }
            }
            "'" => {
                line_y -= leading;
                if let Some(Object::String(bytes, _)) = operands.first() {
                    push_run(&mut runs, line_x, line_y, decode_pdf_string(bytes));
                }
            }
            "\"" => {
                line_y -= leading;
                if let Some(Object::String(bytes, _)) = operands.get(2) {
                    push_run(&mut runs, line_x, line_y, decode_pdf_string(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(parts)) = operands.first() {
                    push_run(&mut runs, line_x, line_y, tj_text(parts));
                }
            }
            _ => {}
        }
    }

    Ok(runs)
}

/// Concatenate the string elements of a TJ array, turning large negative kern
/// adjustments into spaces.
fn tj_text(parts: &[Object]) -> String {
    let mut text = String::new();
    for part in parts {
        match part {
            Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
            Object::Integer(i) if (*i as f32) <= TJ_SPACE_THRESHOLD => text.push(' '),
            Object::Real(r) if *r <= TJ_SPACE_THRESHOLD => text.push(' '),
            _ => {}
        }
    }
    text
}

fn push_run(runs: &mut Vec<PositionedText>, x: f32, y: f32, text: String) {
    if !text.is_empty() {
        runs.push(PositionedText { x, y, text });
    }
}

/// Decode the bytes of a PDF string object: UTF-16BE when the byte-order mark
/// is present, otherwise one byte per character.
pub(crate) fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Collect a page's content stream bytes, concatenating multi-part contents.
fn page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(Vec::new());
    };

    let mut data = Vec::new();
    match contents {
        Object::Reference(id) => append_stream(doc, *id, &mut data)?,
        Object::Array(parts) => {
            for part in parts {
                if let Object::Reference(id) = part {
                    append_stream(doc, *id, &mut data)?;
                    data.push(b'\n');
                }
            }
        }
        _ => {}
    }
    Ok(data)
}

fn append_stream(doc: &Document, id: ObjectId, out: &mut Vec<u8>) -> Result<()> {
    if let Ok(stream) = doc.get_object(id)?.as_stream() {
        let content = stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone());
        out.extend_from_slice(&content);
    }
    Ok(())
}

fn operand_number(operands: &[Object], index: usize) -> Option<f32> {
    match operands.get(index)? {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
