//! PDF text extraction.
//!
//! Extraction is treated as an opaque collaborator: bytes in, plain UTF-8
//! text out. A document that cannot be parsed, or that parses to nothing but
//! whitespace, is an [`Error::Extraction`].

use std::path::Path;

use crate::error::{Error, Result};

/// Read a PDF file and extract its text content.
pub fn extract_pdf(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::Extraction(format!("failed to read {}: {}", path.display(), e)))?;
    extract_pdf_bytes(&bytes)
}

/// Extract text from in-memory PDF bytes.
pub fn extract_pdf_bytes(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| Error::Extraction(e.to_string()))?;
    if text.trim().is_empty() {
        return Err(Error::Extraction("document yielded no text".to_string()));
    }
    Ok(text)
}
