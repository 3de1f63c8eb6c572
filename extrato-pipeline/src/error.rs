//! Ingestion-run error taxonomy.
//!
//! Only whole-run failures live here. Per-unit parse misses are skipped,
//! per-candidate resolution failures downgrade the candidate, and
//! per-record persistence failures land in the save report's error
//! manifest; none of those abort a run.

use extrato_core::error::{AuthError, StoreError};
use extrato_ingest::error::ExtractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no file provided")]
    EmptyFile,

    #[error("no file selected")]
    EmptyFilename,

    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

pub type IngestResult<T> = Result<T, IngestError>;
