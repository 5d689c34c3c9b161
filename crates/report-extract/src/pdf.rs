//! PDF text layer extraction via pdf-extract
//!
//! Only the embedded text layer is read; scanned pages come back empty.

use crate::ExtractError;
use tracing::debug;

/// Extract the text of every page, in page order.
///
/// Blank pages are kept as empty strings so page numbering stays aligned.
pub fn extract_pages(pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes).map_err(|e| {
        let message = e.to_string();
        let lowered = message.to_lowercase();

        if lowered.contains("encrypted") || lowered.contains("password") {
            ExtractError::PasswordProtected
        } else if lowered.contains("invalid")
            || lowered.contains("malformed")
            || lowered.contains("corrupt")
            || lowered.contains("header")
        {
            ExtractError::InvalidPdf(message)
        } else {
            ExtractError::Pdf(message)
        }
    })?;

    debug!(pages = pages.len(), "pdf pages extracted");
    Ok(pages)
}

/// Extract the whole document as one newline-joined string
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    Ok(extract_pages(pdf_bytes)?.join("\n"))
}
