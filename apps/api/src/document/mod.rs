//! Document text extraction for uploaded resumes.
//!
//! PDFs go through `pdf-extract`; `.txt` / `.md` uploads are read as UTF-8.
//! Anything unreadable is a `MalformedInput` error: garbage bytes are never
//! turned into skills.

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

fn detect_kind(bytes: &[u8], file_name: &str) -> Result<DocumentKind, AppError> {
    if bytes.starts_with(PDF_MAGIC) {
        return Ok(DocumentKind::Pdf);
    }
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => Ok(DocumentKind::Pdf),
        "txt" | "md" | "" => Ok(DocumentKind::PlainText),
        other => Err(AppError::MalformedInput(format!(
            "Unsupported resume format '.{other}'. Upload a PDF or plain text file."
        ))),
    }
}

/// Extracts plain text from an uploaded resume. A PDF with no text layer
/// yields an empty string.
///
/// CPU-bound; call from `spawn_blocking` in async contexts.
pub fn extract_text(bytes: &[u8], file_name: &str) -> Result<String, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded resume is empty".to_string()));
    }

    let text = match detect_kind(bytes, file_name)? {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::MalformedInput(format!("Failed to extract PDF text: {e}")))?,
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::MalformedInput("Resume text is not valid UTF-8".to_string())
        })?,
    };

    Ok(text.trim().to_string())
}
