//! JSON-file-backed store: one pretty-printed file per collection under the
//! data dir. Good enough for a single-machine CLI; the pipeline itself only
//! sees the store traits.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use extrato_core::category::{Category, NewCategory};
use extrato_core::error::{StoreError, StoreResult};
use extrato_core::store::{CategoryFilter, CategoryStore, TransactionStore};
use extrato_core::types::PersistedTransaction;

pub struct JsonStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on the JSON files
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Unavailable(format!("create {}: {e}", dir.display())))?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    fn categories_path(&self) -> PathBuf {
        self.dir.join("categories.json")
    }

    fn transactions_path(&self) -> PathBuf {
        self.dir.join("transactions.json")
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(path)
        .map_err(|e| StoreError::Query(format!("read {}: {e}", path.display())))?;
    serde_json::from_str(&s).map_err(|e| StoreError::Query(format!("parse {}: {e}", path.display())))
}

fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(items)
        .map_err(|e| StoreError::Write(e.to_string()))?;
    fs::write(path, json).map_err(|e| StoreError::Write(format!("write {}: {e}", path.display())))
}

#[async_trait]
impl CategoryStore for JsonStore {
    async fn find(&self, filter: &CategoryFilter) -> StoreResult<Vec<Category>> {
        let _guard = self.lock.lock().expect("lock poisoned");
        let categories: Vec<Category> = read_collection(&self.categories_path())?;
        let mut found: Vec<Category> = categories
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Category>> {
        let _guard = self.lock.lock().expect("lock poisoned");
        let categories: Vec<Category> = read_collection(&self.categories_path())?;
        Ok(categories.into_iter().find(|c| c.id == id))
    }

    async fn insert(&self, category: NewCategory) -> StoreResult<Category> {
        let _guard = self.lock.lock().expect("lock poisoned");
        let mut categories: Vec<Category> = read_collection(&self.categories_path())?;
        let stored = Category {
            id: uuid_string(),
            user_id: category.user_id,
            context: category.context,
            name: category.name,
            kind: category.kind,
            color: category.color,
            icon: category.icon,
            emoji: category.emoji,
            created_at: Utc::now(),
        };
        categories.push(stored.clone());
        write_collection(&self.categories_path(), &categories)?;
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().expect("lock poisoned");
        let mut categories: Vec<Category> = read_collection(&self.categories_path())?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(StoreError::NotFound(format!("category {id}")));
        }
        write_collection(&self.categories_path(), &categories)
    }
}

#[async_trait]
impl TransactionStore for JsonStore {
    async fn insert(&self, mut transaction: PersistedTransaction) -> StoreResult<String> {
        let _guard = self.lock.lock().expect("lock poisoned");
        let mut transactions: Vec<PersistedTransaction> =
            read_collection(&self.transactions_path())?;
        if transaction.id.is_empty() {
            transaction.id = uuid_string();
        }
        let id = transaction.id.clone();
        transactions.push(transaction);
        write_collection(&self.transactions_path(), &transactions)?;
        Ok(id)
    }

    async fn find_for_user(&self, user_id: &str) -> StoreResult<Vec<PersistedTransaction>> {
        let _guard = self.lock.lock().expect("lock poisoned");
        let transactions: Vec<PersistedTransaction> =
            read_collection(&self.transactions_path())?;
        let mut found: Vec<PersistedTransaction> = transactions
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(found)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().expect("lock poisoned");
        let mut transactions: Vec<PersistedTransaction> =
            read_collection(&self.transactions_path())?;
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            return Err(StoreError::NotFound(format!("transaction {id}")));
        }
        write_collection(&self.transactions_path(), &transactions)
    }
}

fn uuid_string() -> String {
    uuid::Uuid::new_v4().to_string()
}
