//! Text extraction for uploaded resumes.
//!
//! `.pdf` goes through the text layer first and falls back to OCR when the
//! layer is nearly empty (scanned documents). `.docx` is read from its XML.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

pub mod docx;
pub mod ocr;
pub mod pdf;

pub use ocr::{OcrEngine, TesseractCli};
pub use pdf::{PdfExtractLayer, PdfTextLayer};

/// Below this many characters (after trimming) the PDF text layer is treated
/// as missing and OCR is used instead.
pub const OCR_FALLBACK_THRESHOLD: usize = 50;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("OCR failed: {0}")]
    Ocr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Sniffs the document kind from the file extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractionError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            _ => Err(ExtractionError::UnsupportedFileType(file_name.to_string())),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub kind: DocumentKind,
    pub text: String,
    pub used_ocr: bool,
}

/// Converts uploaded document bytes into plain text.
pub struct TextExtractor {
    pdf: Arc<dyn PdfTextLayer>,
    ocr: Arc<dyn OcrEngine>,
}

impl TextExtractor {
    pub fn new(pdf: Arc<dyn PdfTextLayer>, ocr: Arc<dyn OcrEngine>) -> Self {
        Self { pdf, ocr }
    }

    pub async fn extract(
        &self,
        file_name: &str,
        bytes: Bytes,
    ) -> Result<ExtractedText, ExtractionError> {
        let kind = DocumentKind::from_file_name(file_name)?;

        let (text, used_ocr) = match kind {
            DocumentKind::Pdf => self.extract_pdf(file_name, bytes).await?,
            DocumentKind::Docx => {
                let text = tokio::task::spawn_blocking(move || docx::extract_text(&bytes))
                    .await
                    .map_err(|e| ExtractionError::Docx(format!("extraction task failed: {e}")))??;
                (text, false)
            }
        };

        info!(
            "Extracted {} characters from {file_name} ({:?}, ocr={used_ocr})",
            text.chars().count(),
            kind
        );

        Ok(ExtractedText {
            kind,
            text: text.trim().to_string(),
            used_ocr,
        })
    }

    async fn extract_pdf(
        &self,
        file_name: &str,
        bytes: Bytes,
    ) -> Result<(String, bool), ExtractionError> {
        let layer = Arc::clone(&self.pdf);
        let layer_bytes = bytes.clone();
        // The parser can panic on malformed input; a join error surfaces that as a failure.
        let text = tokio::task::spawn_blocking(move || layer.extract(&layer_bytes))
            .await
            .map_err(|e| ExtractionError::Pdf(format!("extraction task failed: {e}")))??;

        if text.trim().chars().count() >= OCR_FALLBACK_THRESHOLD {
            return Ok((text, false));
        }

        warn!("PDF text layer of {file_name} is nearly empty, falling back to OCR");
        let text = self.ocr.recognize(&bytes).await?;
        Ok((text, true))
    }
}
