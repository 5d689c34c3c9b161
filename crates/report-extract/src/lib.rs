//! Report text extraction
//!
//! Turns one PDF, DOCX or plain-text report into a single string for the
//! analysis engine. The format is chosen from the file extension.

pub mod docx;
pub mod error;
pub mod pdf;

pub use error::ExtractError;

use std::fmt;
use std::path::Path;
use tracing::{info, warn};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    /// Pick a format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" | "text" => Ok(Self::Text),
            _ => Err(ExtractError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// Text pulled out of one report
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    pub format: DocumentFormat,
    pub text: String,
    /// Pages for PDFs, paragraphs for DOCX, lines for plain text
    pub units: usize,
}

impl ExtractedDocument {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extract text from in-memory bytes of a known format
pub fn extract_bytes(
    bytes: &[u8],
    format: DocumentFormat,
) -> Result<ExtractedDocument, ExtractError> {
    let (text, units) = match format {
        DocumentFormat::Pdf => {
            let pages = pdf::extract_pages(bytes)?;
            let count = pages.len();
            (pages.join("\n"), count)
        }
        DocumentFormat::Docx => {
            let paragraphs = docx::extract_paragraphs(bytes)?;
            let count = paragraphs.len();
            (paragraphs.join("\n"), count)
        }
        DocumentFormat::Text => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            let count = text.lines().count();
            (text, count)
        }
    };

    Ok(ExtractedDocument {
        format,
        text,
        units,
    })
}

/// Read a report from disk and extract its text
pub fn extract_file(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    let document = extract_bytes(&bytes, format)?;

    info!(
        file = %path.display(),
        format = %format,
        units = document.units,
        chars = document.text.len(),
        "extracted report text"
    );
    if document.is_blank() {
        warn!(file = %path.display(), "no text extracted; the report may be scanned");
    }

    Ok(document)
}
