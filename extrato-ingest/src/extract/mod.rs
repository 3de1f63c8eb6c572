//! Extraction backends: one interface over PDF text, OCR, and
//! spreadsheet-to-rows conversion.

pub mod ocr;
pub mod pdf;
pub mod spreadsheet;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{FileKind, RawContent};

pub use ocr::{TesseractRecognizer, TextRecognizer};

/// Turns raw upload bytes into parser input.
///
/// Implementations may block a worker only here and are the ingestion
/// run's first suspension point.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, bytes: &[u8], kind: FileKind) -> ExtractResult<RawContent>;

    /// Text-only extraction; rejects tabular formats.
    async fn extract_text(&self, bytes: &[u8], kind: FileKind) -> ExtractResult<String> {
        match self.extract(bytes, kind).await? {
            RawContent::Text(text) => Ok(text),
            RawContent::Table(_) => Err(ExtractError::TextUnsupported(kind.to_string())),
        }
    }
}

/// Default backend wiring: pdf-extract for PDFs, an injected OCR
/// recognizer for images, calamine/csv for spreadsheets.
pub struct StandardExtractor {
    recognizer: Arc<dyn TextRecognizer>,
    ocr_language: String,
}

impl StandardExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            recognizer,
            ocr_language: "por".to_string(),
        }
    }

    pub fn with_ocr_language(mut self, language: impl Into<String>) -> Self {
        self.ocr_language = language.into();
        self
    }
}

#[async_trait]
impl DocumentExtractor for StandardExtractor {
    async fn extract(&self, bytes: &[u8], kind: FileKind) -> ExtractResult<RawContent> {
        debug!(kind = %kind, size = bytes.len(), "extracting document");
        match kind {
            FileKind::Pdf => Ok(RawContent::Text(pdf::extract_pdf_text(bytes).await?)),
            FileKind::Png | FileKind::Jpg | FileKind::Jpeg => {
                let text = self.recognizer.recognize(bytes, &self.ocr_language).await?;
                Ok(RawContent::Text(text))
            }
            FileKind::Csv => Ok(RawContent::Table(spreadsheet::csv_to_table(bytes)?)),
            FileKind::Xlsx | FileKind::Xls => {
                Ok(RawContent::Table(spreadsheet::workbook_to_table(bytes)?))
            }
        }
    }
}
