//! Output assembly
//!
//! Serializes a `RenderPlan` over a template into PDF bytes. Each template
//! page becomes a Form XObject placed once per output page that uses it, so
//! overflow pages share the first page's artwork without duplicating it.
//! No layout decisions happen here.

mod page;
mod xobject;

pub(crate) use page::assemble;
