//! Raw text extraction from uploaded resume files.

use tracing::warn;

/// File formats the service can read text out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    PlainText,
    /// Word documents are accepted but not read.
    Word,
    Unknown,
}

impl ResumeFormat {
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            ResumeFormat::Pdf
        } else if lower.ends_with(".txt") || lower.ends_with(".md") {
            ResumeFormat::PlainText
        } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
            ResumeFormat::Word
        } else {
            ResumeFormat::Unknown
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "application/pdf",
            ResumeFormat::PlainText => "text/plain",
            ResumeFormat::Word => "application/msword",
            ResumeFormat::Unknown => "application/octet-stream",
        }
    }
}

/// Extracts plain text. Unreadable or unsupported files yield an empty string,
/// so the upload still succeeds with empty parsed fields.
pub fn extract_text(bytes: &[u8], file_name: &str) -> String {
    match ResumeFormat::from_file_name(file_name) {
        ResumeFormat::Pdf => match pdf_extract::extract_text_from_mem(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to extract PDF text from {file_name}: {e}");
                String::new()
            }
        },
        ResumeFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        ResumeFormat::Word | ResumeFormat::Unknown => {
            warn!("No text extractor for {file_name}; storing empty resume text");
            String::new()
        }
    }
}
