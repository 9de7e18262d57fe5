//! Template and output I/O

use crate::types::Result;
use pdf_template::Template;
use std::path::Path;

/// Load a template document from disk.
pub async fn load_template(path: impl AsRef<Path>) -> Result<Template> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    let template = tokio::task::spawn_blocking(move || Template::from_bytes(&bytes)).await??;
    Ok(template)
}

/// Save generated document bytes to disk.
pub async fn save_document(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path.as_ref(), bytes).await?;
    Ok(())
}
