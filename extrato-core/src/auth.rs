//! Credential verification seam.
//!
//! The real verifier (Firebase or any other identity provider) lives at the
//! application boundary; the pipeline only depends on this trait, injected
//! at construction. No process-wide singleton.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AuthError;

/// Maps a bearer credential to a stable user identifier.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<String, AuthError>;
}

/// Fixed token table, for the CLI and tests.
#[derive(Debug, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, String>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential for a user id.
    pub fn with_token(mut self, credential: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(credential.into(), user_id.into());
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify(&self, credential: &str) -> Result<String, AuthError> {
        self.tokens
            .get(credential)
            .cloned()
            .ok_or(AuthError::InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_token_resolves_user() {
        let verifier = StaticTokenVerifier::new().with_token("tok-1", "user-a");
        assert_eq!(verifier.verify("tok-1").await.unwrap(), "user-a");
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        let verifier = StaticTokenVerifier::new();
        assert!(matches!(
            verifier.verify("nope").await.unwrap_err(),
            AuthError::InvalidCredential
        ));
    }
}
