use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BudgetCategory, Transaction};
use crate::types::{CategoryId, TransactionId};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Links one transaction to at most one budget category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub transaction_id: TransactionId,
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    /// Mirrors the transaction's charge.
    pub amount: Decimal
}

impl Assignment {
    pub fn uncategorized(transaction: &Transaction) -> Self {
        Self {
            transaction_id: transaction.id,
            category_id: None,
            category_name: UNCATEGORIZED.to_string(),
            amount: transaction.charges
        }
    }

    pub fn to_category(transaction: &Transaction, category: &BudgetCategory) -> Self {
        Self {
            transaction_id: transaction.id,
            category_id: Some(category.id.clone()),
            category_name: category.name.clone(),
            amount: transaction.charges
        }
    }

    pub fn is_categorized(&self) -> bool {
        self.category_id.is_some()
    }
}
