//! Transaction record types shared across the ingestion pipeline

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Namespace partitioning a user's categories and transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Personal,
    Business,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Personal => "personal",
            Context::Business => "business",
        }
    }
}

/// Whether a transaction increases or decreases the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Income,
    Expense,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Income => "income",
            Direction::Expense => "expense",
        }
    }
}

/// Payment status derived at ingestion time from the transaction date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Overdue,
}

/// Which extraction path produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    DocumentExtraction,
    SpreadsheetExtraction,
}

/// An unvalidated, unpersisted record produced by parsing raw input.
/// Amount is always stored as an absolute value; `direction` carries the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub direction: Direction,
    pub description: String,
    pub category_name: String,
    /// Filled in by the resolver; `None` until resolution (or when it failed)
    #[serde(default)]
    pub category_id: Option<String>,
    pub context: Context,
    pub source: ExtractionSource,
    /// The line the candidate was extracted from (text path only)
    pub raw_line: Option<String>,
}

/// A candidate after category resolution and status assignment.
///
/// `category_id` is `None` when resolution failed for this record; the
/// batch continues and the record stays visible with the fallback name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub direction: Direction,
    pub description: String,
    pub category_name: String,
    pub category_id: Option<String>,
    pub context: Context,
    pub source: ExtractionSource,
    pub status: TransactionStatus,
}

impl ProcessedTransaction {
    /// Finalize a resolved candidate with its derived status.
    pub fn from_candidate(candidate: CandidateTransaction, status: TransactionStatus) -> Self {
        Self {
            date: candidate.date,
            amount: candidate.amount,
            direction: candidate.direction,
            description: candidate.description,
            category_name: candidate.category_name,
            category_id: candidate.category_id,
            context: candidate.context,
            source: candidate.source,
            status,
        }
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Expense
    }
}

/// The durable record produced once a candidate is accepted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedTransaction {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub context: Context,
    pub category_id: String,
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: TransactionStatus,
    pub is_recurring: bool,
    pub recurring_day: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_spellings() {
        assert_eq!(serde_json::to_string(&Context::Business).unwrap(), "\"business\"");
        assert_eq!(serde_json::to_string(&Direction::Expense).unwrap(), "\"expense\"");
        assert_eq!(serde_json::to_string(&TransactionStatus::Paid).unwrap(), "\"paid\"");
        assert_eq!(
            serde_json::to_string(&ExtractionSource::SpreadsheetExtraction).unwrap(),
            "\"spreadsheet_extraction\""
        );
    }

    #[test]
    fn test_candidate_roundtrip() {
        let candidate = CandidateTransaction {
            date: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            amount: 89.90,
            direction: Direction::Expense,
            description: "PAGAMENTO CONTA LUZ".to_string(),
            category_name: "Casa e Utilidades".to_string(),
            category_id: None,
            context: Context::Business,
            source: ExtractionSource::DocumentExtraction,
            raw_line: None,
        };
        let json = serde_json::to_string(&candidate).unwrap();
        assert!(json.contains("\"2025-08-03\""));
        let back: CandidateTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, candidate);
    }
}
