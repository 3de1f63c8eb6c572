//! extrato-core: domain types, category suggestion, and the store/identity
//! seams shared by the ingestion pipeline.

pub mod auth;
pub mod categorizer;
pub mod category;
pub mod error;
pub mod memory;
pub mod store;
pub mod types;

pub use auth::{IdentityVerifier, StaticTokenVerifier};
pub use categorizer::{color_for, emoji_for, icon_for, suggest_category};
pub use category::{Category, NewCategory, DEFAULT_BUSINESS_CATEGORIES};
pub use error::{AuthError, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{CategoryFilter, CategoryStore, TransactionStore};
pub use types::{
    CandidateTransaction, Context, Direction, ExtractionSource, PersistedTransaction,
    ProcessedTransaction, TransactionStatus,
};
