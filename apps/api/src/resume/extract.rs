//! Plain-text extraction from uploaded resume files.

use tracing::debug;

use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Docx,
    Unknown,
}

impl DocumentKind {
    /// The declared content type wins; the file extension is the fallback
    /// for clients that send `application/octet-stream`.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some(PDF_MIME) => return DocumentKind::Pdf,
            Some(DOCX_MIME) => return DocumentKind::Docx,
            Some(m) if m.starts_with("text/") => return DocumentKind::PlainText,
            _ => {}
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("txt") | Some("md") => DocumentKind::PlainText,
            Some("docx") => DocumentKind::Docx,
            _ => DocumentKind::Unknown,
        }
    }
}

/// Extracts the text of one uploaded file. Blocking for PDFs; call from
/// `spawn_blocking` in async code.
pub fn extract_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    let kind = DocumentKind::detect(file_name, content_type);
    debug!("Extracting {kind:?} resume ({} bytes)", bytes.len());

    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read PDF: {e}"))
        })?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).into_owned(),
        DocumentKind::Docx => {
            return Err(AppError::UnsupportedMedia(
                "DOCX resumes are not supported; upload a PDF or paste the text".to_string(),
            ))
        }
        DocumentKind::Unknown => {
            return Err(AppError::UnsupportedMedia(format!(
                "Unsupported file type: {}",
                content_type.unwrap_or("unknown")
            )))
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No text could be extracted from the resume".to_string(),
        ));
    }
    Ok(text.to_string())
}
