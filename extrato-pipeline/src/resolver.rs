//! Category resolution: map a suggested name to a stable category id,
//! creating the category on first sighting.
//!
//! The check-then-create sequence runs under a per-(user, context) mutex so
//! concurrent ingestion runs that both meet an unseen name converge on one
//! category instead of racing duplicate inserts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use extrato_core::categorizer::{color_for, emoji_for, icon_for, suggest_category};
use extrato_core::category::{Category, NewCategory, DEFAULT_BUSINESS_CATEGORIES};
use extrato_core::error::StoreResult;
use extrato_core::store::{CategoryFilter, CategoryStore};
use extrato_core::types::{Context, Direction};

/// Outcome of a resolution; `created` feeds the run's categories_created
/// counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub category_id: String,
    pub created: bool,
}

/// Read-only answer from [`CategoryResolver::diagnose`].
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryDiagnosis {
    /// The user already has a matching category.
    Existing(Category),
    /// No match; here is the recipe a create would use. Nothing was written.
    New(NewCategory),
}

type NamespaceKey = (String, Context);

pub struct CategoryResolver {
    store: Arc<dyn CategoryStore>,
    locks: StdMutex<HashMap<NamespaceKey, Arc<AsyncMutex<()>>>>,
}

impl CategoryResolver {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self {
            store,
            locks: StdMutex::new(HashMap::new()),
        }
    }

    fn namespace_lock(&self, user_id: &str, context: Context) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().expect("lock poisoned");
        locks
            .entry((user_id.to_string(), context))
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Resolve a category name to an id, creating the category if absent.
    ///
    /// New categories are always created with type `expense` regardless of
    /// `_direction` — compatibility with the behavior existing clients
    /// depend on; see DESIGN.md.
    pub async fn resolve(
        &self,
        user_id: &str,
        context: Context,
        name: &str,
        _direction: Direction,
    ) -> StoreResult<Resolution> {
        let lock = self.namespace_lock(user_id, context);
        let _guard = lock.lock().await;

        let existing = self
            .store
            .find(&CategoryFilter::exact(user_id, context, name))
            .await?;
        if let Some(category) = existing.into_iter().next() {
            debug!(name, id = %category.id, "category already exists");
            return Ok(Resolution {
                category_id: category.id,
                created: false,
            });
        }

        let created = self
            .store
            .insert(NewCategory::new(
                user_id,
                context,
                name,
                Direction::Expense,
                Some(color_for(name).to_string()),
                Some(icon_for(name).to_string()),
                Some(emoji_for(name).to_string()),
            ))
            .await?;
        info!(name, id = %created.id, "created category");
        Ok(Resolution {
            category_id: created.id,
            created: true,
        })
    }

    /// Read-only diagnosis: would this description map to an existing
    /// category or require a new one? Never writes.
    pub async fn diagnose(
        &self,
        user_id: &str,
        context: Context,
        description: &str,
        kind: Direction,
    ) -> StoreResult<CategoryDiagnosis> {
        let name = suggest_category(description);
        let existing = self
            .store
            .find(&CategoryFilter::exact(user_id, context, &name))
            .await?;
        if let Some(category) = existing.into_iter().next() {
            return Ok(CategoryDiagnosis::Existing(category));
        }
        Ok(CategoryDiagnosis::New(NewCategory::new(
            user_id,
            context,
            &name,
            kind,
            Some(color_for(&name).to_string()),
            Some(icon_for(&name).to_string()),
            Some(emoji_for(&name).to_string()),
        )))
    }

    /// Create the starter business categories a new user gets, skipping any
    /// that already exist. Returns how many were created.
    pub async fn seed_defaults(&self, user_id: &str) -> StoreResult<usize> {
        let lock = self.namespace_lock(user_id, Context::Business);
        let _guard = lock.lock().await;

        let mut created = 0;
        for (name, kind, color, icon, emoji) in DEFAULT_BUSINESS_CATEGORIES {
            let existing = self
                .store
                .find(&CategoryFilter::exact(user_id, Context::Business, *name))
                .await?;
            if existing.is_empty() {
                self.store
                    .insert(NewCategory::new(
                        user_id,
                        Context::Business,
                        *name,
                        *kind,
                        Some((*color).to_string()),
                        Some((*icon).to_string()),
                        Some((*emoji).to_string()),
                    ))
                    .await?;
                created += 1;
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extrato_core::memory::MemoryStore;

    fn resolver() -> (Arc<MemoryStore>, CategoryResolver) {
        let store = Arc::new(MemoryStore::new());
        let resolver = CategoryResolver::new(store.clone());
        (store, resolver)
    }

    #[tokio::test]
    async fn test_creates_then_reuses() {
        let (store, resolver) = resolver();

        let first = resolver
            .resolve("u1", Context::Business, "Combustível", Direction::Expense)
            .await
            .unwrap();
        assert!(first.created);

        let second = resolver
            .resolve("u1", Context::Business, "Combustível", Direction::Expense)
            .await
            .unwrap();
        assert!(!second.created);
        assert_eq!(first.category_id, second.category_id);
        assert_eq!(store.category_count(), 1);
    }

    #[tokio::test]
    async fn test_contexts_are_separate_namespaces() {
        let (store, resolver) = resolver();
        resolver.resolve("u1", Context::Business, "PIX", Direction::Income).await.unwrap();
        let other = resolver
            .resolve("u1", Context::Personal, "PIX", Direction::Income)
            .await
            .unwrap();
        assert!(other.created);
        assert_eq!(store.category_count(), 2);
    }

    #[tokio::test]
    async fn test_new_category_is_always_expense_typed() {
        let (store, resolver) = resolver();
        resolver
            .resolve("u1", Context::Business, "Salário", Direction::Income)
            .await
            .unwrap();
        let categories = store.find(&CategoryFilter::namespace("u1", Context::Business)).await.unwrap();
        assert_eq!(categories[0].kind, Direction::Expense);
    }

    #[tokio::test]
    async fn test_new_category_carries_known_style() {
        let (store, resolver) = resolver();
        resolver
            .resolve("u1", Context::Personal, "Combustível", Direction::Expense)
            .await
            .unwrap();
        let categories = store.find(&CategoryFilter::namespace("u1", Context::Personal)).await.unwrap();
        assert_eq!(categories[0].color, "#F59E0B");
        assert_eq!(categories[0].icon, "fuel");
        assert_eq!(categories[0].emoji, "⛽");
    }

    #[tokio::test]
    async fn test_concurrent_resolutions_converge_on_one_category() {
        let (store, resolver) = resolver();
        let resolver = Arc::new(resolver);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let resolver = resolver.clone();
            handles.push(tokio::spawn(async move {
                resolver
                    .resolve("u1", Context::Business, "Fornecedores", Direction::Expense)
                    .await
                    .unwrap()
            }));
        }

        let mut ids = Vec::new();
        let mut created_count = 0;
        for handle in handles {
            let resolution = handle.await.unwrap();
            if resolution.created {
                created_count += 1;
            }
            ids.push(resolution.category_id);
        }

        assert_eq!(created_count, 1);
        assert_eq!(store.category_count(), 1);
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_diagnose_existing_does_not_write() {
        let (store, resolver) = resolver();
        resolver
            .resolve("u1", Context::Business, "PIX", Direction::Expense)
            .await
            .unwrap();

        let diagnosis = resolver
            .diagnose("u1", Context::Business, "pix recebido cliente", Direction::Income)
            .await
            .unwrap();
        assert!(matches!(diagnosis, CategoryDiagnosis::Existing(ref c) if c.name == "PIX"));
        assert_eq!(store.category_count(), 1);
    }

    #[tokio::test]
    async fn test_diagnose_new_returns_recipe_without_writing() {
        let (store, resolver) = resolver();
        let diagnosis = resolver
            .diagnose("u1", Context::Business, "Posto Shell", Direction::Expense)
            .await
            .unwrap();
        match diagnosis {
            CategoryDiagnosis::New(recipe) => {
                assert_eq!(recipe.name, "Combustível");
                assert_eq!(recipe.emoji, "⛽");
            }
            CategoryDiagnosis::Existing(_) => panic!("expected a new-category recipe"),
        }
        assert_eq!(store.category_count(), 0);
    }

    #[tokio::test]
    async fn test_seed_defaults_is_idempotent() {
        let (store, resolver) = resolver();
        assert_eq!(resolver.seed_defaults("u1").await.unwrap(), 9);
        assert_eq!(resolver.seed_defaults("u1").await.unwrap(), 0);
        assert_eq!(store.category_count(), 9);
    }
}
