//! Category records and the default seed set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Context, Direction};

/// A user-owned transaction category.
///
/// At most one category should exist per (user_id, context, name); the
/// resolver enforces this at lookup time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub context: Context,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Direction,
    pub color: String,
    pub icon: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a category; the store assigns id and created_at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub user_id: String,
    pub context: Context,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Direction,
    pub color: String,
    pub icon: String,
    pub emoji: String,
}

impl NewCategory {
    /// Build a payload applying the store defaults for missing visuals.
    pub fn new(
        user_id: impl Into<String>,
        context: Context,
        name: impl Into<String>,
        kind: Direction,
        color: Option<String>,
        icon: Option<String>,
        emoji: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            context,
            name: name.into(),
            kind,
            color: color.unwrap_or_else(|| "#3B82F6".to_string()),
            icon: icon.unwrap_or_else(|| "folder".to_string()),
            emoji: emoji.unwrap_or_else(|| "📁".to_string()),
        }
    }
}

/// Starter categories offered to new business users.
pub const DEFAULT_BUSINESS_CATEGORIES: &[(&str, Direction, &str, &str, &str)] = &[
    ("Salários", Direction::Expense, "#DC2626", "briefcase", "💼"),
    ("Aluguel", Direction::Expense, "#7C2D12", "building", "🏢"),
    ("Combustível", Direction::Expense, "#EA580C", "fuel", "⛽"),
    ("Impostos", Direction::Expense, "#B91C1C", "receipt", "📋"),
    ("Manutenção", Direction::Expense, "#92400E", "wrench", "🔧"),
    ("Fornecedores", Direction::Expense, "#7C3AED", "shopping-cart", "🛍️"),
    ("Vendas", Direction::Income, "#059669", "dollar-sign", "💰"),
    ("Serviços", Direction::Income, "#0D9488", "wrench", "🛠️"),
    ("Receitas Diversas", Direction::Income, "#047857", "trending-up", "📈"),
];
