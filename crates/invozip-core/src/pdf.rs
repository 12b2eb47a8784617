//! PDF page-text access.
//!
//! The parsing core only ever consumes linearized text lines; this
//! module is the sole place that touches PDF binary content.

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Extract per-page text from one PDF document.
pub fn extract_page_text(path: &Path) -> Result<Vec<String>> {
    let pages = pdf_extract::extract_text_by_pages(path)?;
    debug!(
        path = %path.display(),
        pages = pages.len(),
        "extracted page text"
    );
    Ok(pages)
}
