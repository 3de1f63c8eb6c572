//! extrato-ingest: document extraction backends (PDF/OCR/spreadsheet) and
//! the line/row parser that turns raw content into candidate transactions.

pub mod error;
pub mod extract;
pub mod parse;
pub mod types;

pub use error::{ExtractError, ExtractResult};
pub use extract::{DocumentExtractor, StandardExtractor, TesseractRecognizer, TextRecognizer};
pub use parse::{detect_direction, parse_amount, parse_date, LineParser};
pub use types::{FileKind, RawContent, TableContent};
