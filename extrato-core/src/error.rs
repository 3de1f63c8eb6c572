//! Error types shared by the store and identity seams.

use thiserror::Error;

/// Failures surfaced by document-store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("document not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures surfaced by credential verification.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credential")]
    InvalidCredential,

    #[error("expired credential")]
    ExpiredCredential,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Query("bad filter".to_string());
        assert_eq!(err.to_string(), "query failed: bad filter");
    }

    #[test]
    fn test_auth_error_display() {
        assert_eq!(AuthError::InvalidCredential.to_string(), "invalid credential");
    }
}
