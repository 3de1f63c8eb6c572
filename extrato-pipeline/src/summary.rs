//! Aggregate summary of one ingestion run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use extrato_core::types::ProcessedTransaction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub count: usize,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub total_transactions: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_amount: f64,
    pub categories: BTreeMap<String, CategoryBreakdown>,
    pub date_range: Option<DateRange>,
    pub categories_created: usize,
}

/// Compute counts and totals for a processed batch. Amounts are absolute
/// values, so `total_income + total_expenses` equals the plain sum of all
/// amounts.
pub fn summarize(transactions: &[ProcessedTransaction], categories_created: usize) -> ProcessingSummary {
    if transactions.is_empty() {
        return ProcessingSummary {
            categories_created,
            ..ProcessingSummary::default()
        };
    }

    let mut summary = ProcessingSummary {
        total_transactions: transactions.len(),
        categories_created,
        ..ProcessingSummary::default()
    };

    for transaction in transactions {
        if transaction.is_income() {
            summary.income_count += 1;
            summary.total_income += transaction.amount;
        } else {
            summary.expense_count += 1;
            summary.total_expenses += transaction.amount;
        }

        let entry = summary
            .categories
            .entry(transaction.category_name.clone())
            .or_default();
        entry.count += 1;
        entry.total += transaction.amount;
    }

    summary.net_amount = summary.total_income - summary.total_expenses;
    summary.date_range = Some(DateRange {
        start: transactions.iter().map(|t| t.date).min().expect("non-empty batch"),
        end: transactions.iter().map(|t| t.date).max().expect("non-empty batch"),
    });
    summary
}
