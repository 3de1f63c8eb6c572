//! extrato-pipeline: category resolution, validation, persistence glue,
//! and the ingestion orchestrator.

pub mod error;
pub mod orchestrator;
pub mod resolver;
pub mod saver;
pub mod summary;
pub mod validator;

pub use error::{IngestError, IngestResult};
pub use orchestrator::{
    CategoryPreview, CategoryRef, IngestionOutcome, IngestionRequest, IngestionService,
};
pub use resolver::{CategoryDiagnosis, CategoryResolver, Resolution};
pub use saver::{AutoSaveReport, SaveRecordError, SaveReport, SavedRecord, TransactionSaver};
pub use summary::{summarize, CategoryBreakdown, DateRange, ProcessingSummary};
pub use validator::validate;
