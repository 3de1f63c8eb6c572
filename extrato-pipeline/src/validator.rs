//! Candidate validation: a total filter that never errors. Malformed
//! candidates simply do not appear in the output.

use extrato_core::types::CandidateTransaction;
use tracing::debug;

/// Persisted descriptions are capped at this many characters; longer ones
/// are truncated, not rejected.
const DESCRIPTION_LIMIT: usize = 200;

/// Keep candidates with a positive amount and a non-empty description.
///
/// Dates are already `NaiveDate` here, so the canonical-format check
/// happened at parse time. Order is preserved.
pub fn validate(candidates: Vec<CandidateTransaction>) -> Vec<CandidateTransaction> {
    candidates
        .into_iter()
        .filter_map(|mut candidate| {
            if candidate.amount <= 0.0 {
                debug!(amount = candidate.amount, "dropping candidate with non-positive amount");
                return None;
            }
            if candidate.description.is_empty() {
                debug!("dropping candidate without description");
                return None;
            }
            if candidate.description.chars().count() > DESCRIPTION_LIMIT {
                candidate.description = candidate.description.chars().take(DESCRIPTION_LIMIT).collect();
            }
            Some(candidate)
        })
        .collect()
}
