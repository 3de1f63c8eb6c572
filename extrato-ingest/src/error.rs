//! Extraction failure taxonomy. Any of these aborts the whole ingestion
//! run; per-line parse misses are not errors and never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("pdf extraction failed: {0}")]
    Pdf(String),

    #[error("image recognition failed: {0}")]
    Image(String),

    #[error("ocr backend unavailable: {0}")]
    OcrUnavailable(String),

    #[error("spreadsheet parsing failed: {0}")]
    Spreadsheet(String),

    #[error("text extraction not supported for {0} files")]
    TextUnsupported(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ExtractResult<T> = Result<T, ExtractError>;
