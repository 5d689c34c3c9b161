use thiserror::Error;

/// Errors that can occur while pulling text out of a report
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0} (expected .pdf, .docx or .txt)")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Invalid PDF: {0}")]
    InvalidPdf(String),

    #[error("Password-protected PDF")]
    PasswordProtected,

    #[error("DOCX archive unreadable: {0}")]
    Docx(String),

    #[error("DOCX XML malformed: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
