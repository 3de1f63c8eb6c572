//! In-memory store used by tests and as the zero-setup CLI fallback.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::category::{Category, NewCategory};
use crate::error::{StoreError, StoreResult};
use crate::store::{CategoryFilter, CategoryStore, TransactionStore};
use crate::types::PersistedTransaction;

/// Process-local store backed by locked vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: RwLock<Vec<Category>>,
    transactions: RwLock<Vec<PersistedTransaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category_count(&self) -> usize {
        self.categories.read().expect("lock poisoned").len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.read().expect("lock poisoned").len()
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find(&self, filter: &CategoryFilter) -> StoreResult<Vec<Category>> {
        let categories = self.categories.read().expect("lock poisoned");
        let mut found: Vec<Category> = categories
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().expect("lock poisoned");
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, category: NewCategory) -> StoreResult<Category> {
        let stored = Category {
            id: Uuid::new_v4().to_string(),
            user_id: category.user_id,
            context: category.context,
            name: category.name,
            kind: category.kind,
            color: category.color,
            icon: category.icon,
            emoji: category.emoji,
            created_at: Utc::now(),
        };
        self.categories.write().expect("lock poisoned").push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut categories = self.categories.write().expect("lock poisoned");
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(StoreError::NotFound(format!("category {id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn insert(&self, mut transaction: PersistedTransaction) -> StoreResult<String> {
        if transaction.id.is_empty() {
            transaction.id = Uuid::new_v4().to_string();
        }
        let id = transaction.id.clone();
        self.transactions.write().expect("lock poisoned").push(transaction);
        Ok(id)
    }

    async fn find_for_user(&self, user_id: &str) -> StoreResult<Vec<PersistedTransaction>> {
        let transactions = self.transactions.read().expect("lock poisoned");
        let mut found: Vec<PersistedTransaction> = transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut transactions = self.transactions.write().expect("lock poisoned");
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            return Err(StoreError::NotFound(format!("transaction {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Context, Direction};

    fn payload(user: &str, name: &str) -> NewCategory {
        NewCategory::new(user, Context::Business, name, Direction::Expense, None, None, None)
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = CategoryStore::insert(&store, payload("u1", "PIX")).await.unwrap();
        let b = CategoryStore::insert(&store, payload("u1", "Lazer")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.category_count(), 2);
    }

    #[tokio::test]
    async fn test_find_filters_and_sorts_by_name() {
        let store = MemoryStore::new();
        CategoryStore::insert(&store, payload("u1", "Transporte")).await.unwrap();
        CategoryStore::insert(&store, payload("u1", "Alimentação")).await.unwrap();
        CategoryStore::insert(&store, payload("u2", "Transporte")).await.unwrap();

        let found = store
            .find(&CategoryFilter::namespace("u1", Context::Business))
            .await
            .unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alimentação", "Transporte"]);
    }

    #[tokio::test]
    async fn test_exact_lookup_misses_other_context() {
        let store = MemoryStore::new();
        CategoryStore::insert(&store, payload("u1", "PIX")).await.unwrap();
        let found = store
            .find(&CategoryFilter::exact("u1", Context::Personal, "PIX"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = CategoryStore::delete(&store, "missing").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
