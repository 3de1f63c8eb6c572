//! Persistence glue: writes accepted records through the transaction
//! store, collecting per-record failures instead of aborting the batch.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use extrato_core::store::{CategoryStore, TransactionStore};
use extrato_core::types::{PersistedTransaction, ProcessedTransaction};

use crate::error::IngestError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRecord {
    pub index: usize,
    pub transaction_id: String,
}

/// One record that did not land, keyed by its position in the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecordError {
    pub index: usize,
    pub error: String,
}

/// Outcome of an explicit save: what landed and an error manifest for what
/// did not. Callers never have to guess why a count is low.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveReport {
    pub saved: Vec<SavedRecord>,
    pub errors: Vec<SaveRecordError>,
}

impl SaveReport {
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

/// Outcome of the orchestrator-triggered auto-save.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoSaveReport {
    pub saved_count: usize,
    pub errors: Vec<SaveRecordError>,
}

pub struct TransactionSaver {
    transactions: Arc<dyn TransactionStore>,
    categories: Arc<dyn CategoryStore>,
}

impl TransactionSaver {
    pub fn new(transactions: Arc<dyn TransactionStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self {
            transactions,
            categories,
        }
    }

    /// Save a reviewed batch. Every record is attempted; failures go into
    /// the report's error manifest under the record's batch position.
    pub async fn save_batch(&self, records: &[ProcessedTransaction], user_id: &str) -> SaveReport {
        let mut report = SaveReport::default();

        for (index, record) in records.iter().enumerate() {
            match self.save_one(record, user_id).await {
                Ok(transaction_id) => {
                    debug!(index, %transaction_id, "saved transaction");
                    report.saved.push(SavedRecord { index, transaction_id });
                }
                Err(err) => {
                    warn!(index, error = %err, "failed to save transaction");
                    report.errors.push(SaveRecordError {
                        index,
                        error: err.to_string(),
                    });
                }
            }
        }

        report
    }

    /// Persist every record that has a resolved category id, skipping the
    /// rest. Used by the ingestion run when auto-save is requested.
    pub async fn auto_save(&self, records: &[ProcessedTransaction], user_id: &str) -> AutoSaveReport {
        let mut report = AutoSaveReport::default();

        for (index, record) in records.iter().enumerate() {
            if record.category_id.is_none() {
                continue;
            }
            match self.save_one(record, user_id).await {
                Ok(_) => report.saved_count += 1,
                Err(err) => {
                    warn!(index, error = %err, "auto-save failed for record");
                    report.errors.push(SaveRecordError {
                        index,
                        error: err.to_string(),
                    });
                }
            }
        }

        report
    }

    async fn save_one(&self, record: &ProcessedTransaction, user_id: &str) -> Result<String, IngestError> {
        let category_id = record
            .category_id
            .clone()
            .ok_or_else(|| IngestError::MissingField("category_id".to_string()))?;

        // A persisted transaction must reference a category owned by the
        // same user.
        let category = self
            .categories
            .find_by_id(&category_id)
            .await?
            .ok_or_else(|| {
                IngestError::PermissionDenied(format!("category {category_id} does not exist"))
            })?;
        if category.user_id != user_id {
            return Err(IngestError::PermissionDenied(format!(
                "category {category_id} belongs to another user"
            )));
        }

        let now = Utc::now();
        let id = self
            .transactions
            .insert(PersistedTransaction {
                id: String::new(),
                user_id: user_id.to_string(),
                description: record.description.clone(),
                amount: record.amount,
                direction: record.direction,
                context: record.context,
                category_id,
                date: record.date,
                due_date: None,
                status: record.status,
                is_recurring: false,
                recurring_day: None,
                created_at: now,
                updated_at: now,
            })
            .await?;
        Ok(id)
    }
}
