//! Ingestion orchestrator: drives one upload through
//! extract → parse → classify/resolve → validate → status → summary →
//! optional auto-save.
//!
//! A run either fails fast (bad input, extraction failure) or succeeds
//! with a best-effort batch plus an explicit error manifest for anything
//! that did not make it.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use extrato_core::auth::IdentityVerifier;
use extrato_core::categorizer::suggest_category;
use extrato_core::store::{CategoryFilter, CategoryStore, TransactionStore};
use extrato_core::types::{
    CandidateTransaction, Context, Direction, ProcessedTransaction, TransactionStatus,
};
use extrato_ingest::extract::DocumentExtractor;
use extrato_ingest::parse::LineParser;
use extrato_ingest::types::FileKind;

use crate::error::{IngestError, IngestResult};
use crate::resolver::{CategoryDiagnosis, CategoryResolver};
use crate::saver::{AutoSaveReport, SaveReport, TransactionSaver};
use crate::summary::{summarize, ProcessingSummary};
use crate::validator::validate;

/// Category name tagged onto candidates whose resolution failed.
const UNRESOLVED_CATEGORY: &str = "outros";

/// One upload to process.
#[derive(Debug, Clone)]
pub struct IngestionRequest {
    pub file_bytes: Vec<u8>,
    pub filename: String,
    pub context: Context,
    pub user_id: String,
    pub auto_save: bool,
}

/// Category id/name pair for the response's available-categories listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// Terminal success of an ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionOutcome {
    pub transactions: Vec<ProcessedTransaction>,
    pub summary: ProcessingSummary,
    pub filename: String,
    pub available_categories: Vec<CategoryRef>,
    pub categories_created: usize,
    pub auto_save: Option<AutoSaveReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPreview {
    pub description: String,
    pub suggested_category: String,
}

/// The pipeline facade handed to the routing layer. All collaborators are
/// injected; nothing global.
pub struct IngestionService {
    extractor: Arc<dyn DocumentExtractor>,
    categories: Arc<dyn CategoryStore>,
    resolver: CategoryResolver,
    saver: TransactionSaver,
    verifier: Arc<dyn IdentityVerifier>,
    parser: LineParser,
}

impl IngestionService {
    pub fn new(
        extractor: Arc<dyn DocumentExtractor>,
        categories: Arc<dyn CategoryStore>,
        transactions: Arc<dyn TransactionStore>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            extractor,
            categories: categories.clone(),
            resolver: CategoryResolver::new(categories.clone()),
            saver: TransactionSaver::new(transactions, categories),
            verifier,
            parser: LineParser::new(),
        }
    }

    /// Verify a credential and run ingestion for the resolved user.
    pub async fn ingest_with_credential(
        &self,
        credential: &str,
        file_bytes: Vec<u8>,
        filename: String,
        context: Context,
        auto_save: bool,
    ) -> IngestResult<IngestionOutcome> {
        let user_id = self.verifier.verify(credential).await?;
        self.ingest(IngestionRequest {
            file_bytes,
            filename,
            context,
            user_id,
            auto_save,
        })
        .await
    }

    /// Process one upload end to end for an already-verified user.
    pub async fn ingest(&self, request: IngestionRequest) -> IngestResult<IngestionOutcome> {
        let kind = accepted_kind(&request.filename, &request.file_bytes)?;
        info!(
            filename = %request.filename,
            context = request.context.as_str(),
            auto_save = request.auto_save,
            "processing document"
        );

        let content = self.extractor.extract(&request.file_bytes, kind).await?;
        let candidates = self.parser.parse_content(&content, request.context);
        info!(candidates = candidates.len(), "parsed content units");

        let (resolved, categories_created) = self
            .resolve_candidates(candidates, &request.user_id, request.context)
            .await;
        let validated = validate(resolved);
        let transactions = assign_status(validated, Local::now().date_naive());

        let summary = summarize(&transactions, categories_created);
        let available_categories = self
            .available_categories(&request.user_id, request.context)
            .await?;

        let auto_save = if request.auto_save && !transactions.is_empty() {
            Some(self.saver.auto_save(&transactions, &request.user_id).await)
        } else {
            None
        };

        info!(
            transactions = transactions.len(),
            categories_created,
            "processing finished"
        );
        Ok(IngestionOutcome {
            transactions,
            summary,
            filename: request.filename,
            available_categories,
            categories_created,
            auto_save,
        })
    }

    /// Resolve a category id for every candidate. A failed resolution
    /// downgrades the candidate to the explicit unresolved marker instead
    /// of dropping it.
    async fn resolve_candidates(
        &self,
        candidates: Vec<CandidateTransaction>,
        user_id: &str,
        context: Context,
    ) -> (Vec<CandidateTransaction>, usize) {
        let mut categories_created = 0;
        let mut resolved = Vec::with_capacity(candidates.len());

        for mut candidate in candidates {
            match self
                .resolver
                .resolve(user_id, context, &candidate.category_name, candidate.direction)
                .await
            {
                Ok(resolution) => {
                    if resolution.created {
                        categories_created += 1;
                    }
                    candidate.category_id = Some(resolution.category_id);
                }
                Err(err) => {
                    warn!(
                        description = %candidate.description,
                        error = %err,
                        "category resolution failed; tagging as unresolved"
                    );
                    candidate.category_id = None;
                    candidate.category_name = UNRESOLVED_CATEGORY.to_string();
                }
            }
            resolved.push(candidate);
        }

        (resolved, categories_created)
    }

    async fn available_categories(
        &self,
        user_id: &str,
        context: Context,
    ) -> IngestResult<Vec<CategoryRef>> {
        let categories = self
            .categories
            .find(&CategoryFilter::namespace(user_id, context))
            .await?;
        Ok(categories
            .into_iter()
            .map(|c| CategoryRef { id: c.id, name: c.name })
            .collect())
    }

    /// Pure preview: suggested category per description, no persistence.
    pub fn preview_categories(&self, descriptions: &[String]) -> Vec<CategoryPreview> {
        descriptions
            .iter()
            .map(|description| CategoryPreview {
                description: description.clone(),
                suggested_category: suggest_category(description),
            })
            .collect()
    }

    /// Read-only diagnosis of what a description would resolve to.
    pub async fn diagnose_category(
        &self,
        user_id: &str,
        context: Context,
        description: &str,
        kind: Direction,
    ) -> IngestResult<CategoryDiagnosis> {
        Ok(self
            .resolver
            .diagnose(user_id, context, description, kind)
            .await?)
    }

    /// Save a user-reviewed batch.
    pub async fn save_transactions(
        &self,
        records: &[ProcessedTransaction],
        user_id: &str,
    ) -> SaveReport {
        self.saver.save_batch(records, user_id).await
    }

    /// Text-only extraction of an upload; rejects tabular formats.
    pub async fn extract_text(&self, file_bytes: &[u8], filename: &str) -> IngestResult<String> {
        let kind = accepted_kind(filename, file_bytes)?;
        Ok(self.extractor.extract_text(file_bytes, kind).await?)
    }

    /// Create the starter categories for a user.
    pub async fn seed_defaults(&self, user_id: &str) -> IngestResult<usize> {
        Ok(self.resolver.seed_defaults(user_id).await?)
    }
}

fn accepted_kind(filename: &str, file_bytes: &[u8]) -> IngestResult<FileKind> {
    if filename.is_empty() {
        return Err(IngestError::EmptyFilename);
    }
    if file_bytes.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    FileKind::from_filename(filename)
        .ok_or_else(|| IngestError::UnsupportedFileType(filename.to_string()))
}

/// Date on or before today means the transaction already happened.
fn assign_status(
    candidates: Vec<CandidateTransaction>,
    today: NaiveDate,
) -> Vec<ProcessedTransaction> {
    candidates
        .into_iter()
        .map(|candidate| {
            let status = if candidate.date <= today {
                TransactionStatus::Paid
            } else {
                TransactionStatus::Pending
            };
            ProcessedTransaction::from_candidate(candidate, status)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use extrato_core::auth::StaticTokenVerifier;
    use extrato_core::error::AuthError;
    use extrato_core::memory::MemoryStore;
    use extrato_core::types::{Direction, ExtractionSource};
    use extrato_ingest::error::ExtractResult;
    use extrato_ingest::types::RawContent;

    /// Extractor stub that returns canned content for any upload.
    struct FixedExtractor(RawContent);

    #[async_trait]
    impl DocumentExtractor for FixedExtractor {
        async fn extract(&self, _bytes: &[u8], _kind: FileKind) -> ExtractResult<RawContent> {
            Ok(self.0.clone())
        }
    }

    fn service_with_text(text: &str) -> (Arc<MemoryStore>, IngestionService) {
        let store = Arc::new(MemoryStore::new());
        let service = IngestionService::new(
            Arc::new(FixedExtractor(RawContent::Text(text.to_string()))),
            store.clone(),
            store.clone(),
            Arc::new(StaticTokenVerifier::new().with_token("tok", "u1")),
        );
        (store, service)
    }

    fn request(auto_save: bool) -> IngestionRequest {
        IngestionRequest {
            file_bytes: b"%PDF-stub".to_vec(),
            filename: "extrato.pdf".to_string(),
            context: Context::Business,
            user_id: "u1".to_string(),
            auto_save,
        }
    }

    #[tokio::test]
    async fn test_rejects_empty_filename() {
        let (_, service) = service_with_text("");
        let mut req = request(false);
        req.filename = String::new();
        assert!(matches!(
            service.ingest(req).await.unwrap_err(),
            IngestError::EmptyFilename
        ));
    }

    #[tokio::test]
    async fn test_rejects_empty_payload() {
        let (_, service) = service_with_text("");
        let mut req = request(false);
        req.file_bytes.clear();
        assert!(matches!(
            service.ingest(req).await.unwrap_err(),
            IngestError::EmptyFile
        ));
    }

    #[tokio::test]
    async fn test_rejects_unknown_extension_before_extraction() {
        let (_, service) = service_with_text("01/01/2025 irrelevante 10,00");
        let mut req = request(false);
        req.filename = "documento.docx".to_string();
        assert!(matches!(
            service.ingest(req).await.unwrap_err(),
            IngestError::UnsupportedFileType(_)
        ));
    }

    #[tokio::test]
    async fn test_text_run_extracts_resolves_and_summarizes() {
        let (store, service) = service_with_text(
            "03/08/2025 PAGAMENTO CONTA LUZ -89,90\n\
             linha curta\n\
             02/08/2025 PIX RECEBIDO CLIENTE +500,00",
        );
        let outcome = service.ingest(request(false)).await.unwrap();

        assert_eq!(outcome.transactions.len(), 2);
        assert_eq!(outcome.categories_created, 2);
        assert_eq!(outcome.summary.total_transactions, 2);
        assert_eq!(outcome.summary.total_income, 500.0);
        assert!((outcome.summary.net_amount - 410.10).abs() < 1e-9);

        // Dates in the past resolve to paid
        assert!(outcome
            .transactions
            .iter()
            .all(|t| t.status == TransactionStatus::Paid));

        // Both created categories show up in the listing, sorted by name
        let names: Vec<&str> = outcome
            .available_categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Casa e Utilidades", "PIX"]);

        // Nothing persisted without auto-save
        assert!(outcome.auto_save.is_none());
        assert_eq!(store.transaction_count(), 0);
    }

    #[tokio::test]
    async fn test_repeated_category_is_created_once() {
        let (store, service) = service_with_text(
            "01/08/2025 posto ipiranga 100,00\n02/08/2025 posto shell 50,00",
        );
        let outcome = service.ingest(request(false)).await.unwrap();
        assert_eq!(outcome.categories_created, 1);
        assert_eq!(store.category_count(), 1);
        let ids: Vec<_> = outcome
            .transactions
            .iter()
            .map(|t| t.category_id.clone().unwrap())
            .collect();
        assert_eq!(ids[0], ids[1]);
    }

    #[tokio::test]
    async fn test_auto_save_persists_resolved_records() {
        let (store, service) =
            service_with_text("03/08/2025 PAGAMENTO CONTA LUZ -89,90");
        let outcome = service.ingest(request(true)).await.unwrap();

        let report = outcome.auto_save.unwrap();
        assert_eq!(report.saved_count, 1);
        assert!(report.errors.is_empty());
        assert_eq!(store.transaction_count(), 1);
    }

    #[tokio::test]
    async fn test_credential_entry_point_verifies_first() {
        let (_, service) = service_with_text("03/08/2025 PAGAMENTO CONTA LUZ -89,90");
        let outcome = service
            .ingest_with_credential(
                "tok",
                b"%PDF-stub".to_vec(),
                "extrato.pdf".to_string(),
                Context::Business,
                false,
            )
            .await
            .unwrap();
        assert_eq!(outcome.transactions.len(), 1);

        let err = service
            .ingest_with_credential(
                "wrong",
                b"%PDF-stub".to_vec(),
                "extrato.pdf".to_string(),
                Context::Business,
                false,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::Auth(AuthError::InvalidCredential)));
    }

    #[tokio::test]
    async fn test_preview_is_pure() {
        let (store, service) = service_with_text("");
        let previews = service.preview_categories(&[
            "Posto Shell".to_string(),
            "".to_string(),
        ]);
        assert_eq!(previews[0].suggested_category, "Combustível");
        assert_eq!(previews[1].suggested_category, "Outros");
        assert_eq!(store.category_count(), 0);
    }

    #[test]
    fn test_status_assignment_boundaries() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let candidate = |date: NaiveDate| CandidateTransaction {
            date,
            amount: 1.0,
            direction: Direction::Expense,
            description: "t".to_string(),
            category_name: "Outros".to_string(),
            category_id: None,
            context: Context::Personal,
            source: ExtractionSource::DocumentExtraction,
            raw_line: None,
        };

        let statuses: Vec<TransactionStatus> = assign_status(
            vec![
                candidate(today.pred_opt().unwrap()),
                candidate(today),
                candidate(today.succ_opt().unwrap()),
            ],
            today,
        )
        .into_iter()
        .map(|t| t.status)
        .collect();

        assert_eq!(
            statuses,
            vec![
                TransactionStatus::Paid,
                TransactionStatus::Paid,
                TransactionStatus::Pending,
            ]
        );
    }
}
