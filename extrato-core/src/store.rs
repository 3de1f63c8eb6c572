//! Document-store traits consumed by the ingestion pipeline.
//!
//! The backing store is an external collaborator; these traits narrow its
//! generic find/insert/delete contract to the two collections the pipeline
//! touches. Implementations must be safe to share across concurrent
//! ingestion runs.

use async_trait::async_trait;

use crate::category::{Category, NewCategory};
use crate::error::StoreResult;
use crate::types::{Context, PersistedTransaction};

/// Filter for category lookups. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    pub user_id: Option<String>,
    pub context: Option<Context>,
    pub name: Option<String>,
}

impl CategoryFilter {
    /// Filter on the full uniqueness triple.
    pub fn exact(user_id: impl Into<String>, context: Context, name: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            context: Some(context),
            name: Some(name.into()),
        }
    }

    /// Filter on a user's whole namespace within one context.
    pub fn namespace(user_id: impl Into<String>, context: Context) -> Self {
        Self {
            user_id: Some(user_id.into()),
            context: Some(context),
            name: None,
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        self.user_id.as_deref().is_none_or(|u| u == category.user_id)
            && self.context.is_none_or(|c| c == category.context)
            && self.name.as_deref().is_none_or(|n| n == category.name)
    }
}

/// Creates and retrieves transaction categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Find categories matching the filter, sorted by name.
    async fn find(&self, filter: &CategoryFilter) -> StoreResult<Vec<Category>>;

    /// Find one category by id.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Category>>;

    /// Insert a new category, returning it with a store-assigned id.
    async fn insert(&self, category: NewCategory) -> StoreResult<Category>;

    /// Delete a category by id.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Persists accepted transactions.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert a transaction, returning the store-assigned id.
    async fn insert(&self, transaction: PersistedTransaction) -> StoreResult<String>;

    /// All transactions for a user, newest date first.
    async fn find_for_user(&self, user_id: &str) -> StoreResult<Vec<PersistedTransaction>>;

    /// Delete a transaction by id.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
