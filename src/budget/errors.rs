use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{CategoryId, TransactionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("Transaction [{transaction_id}] has no assignment to override")]
    TransactionNotFound {
        transaction_id: TransactionId
    },
    #[error("Category [{category_id}] was not found")]
    CategoryNotFound {
        category_id: CategoryId
    }
}

#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Category name must not be empty")]
    EmptyName,
    #[error("Budget for category [{name}] must be positive, got {budget}")]
    NonPositiveBudget {
        name: String,
        budget: Decimal
    },
    #[error("Budget for category [{name}] must not be negative, got {budget}")]
    NegativeBudget {
        name: String,
        budget: Decimal
    },
    #[error("Budget {budget} for category [{name}] exceeds the remaining income {remaining}")]
    ExceedsRemainingIncome {
        name: String,
        budget: Decimal,
        remaining: Decimal
    },
    #[error("Amount {amount} for category [{name}] is outside the supported range")]
    AmountOutOfRange {
        name: String,
        amount: Decimal
    },
    #[error("Category [{category_id}] was not found")]
    CategoryNotFound {
        category_id: String
    },
    #[error("Category id [{category_id}] is used more than once")]
    DuplicateCategory {
        category_id: String
    },
    #[error("Category file error: {0}")]
    Csv(#[from] csv::Error)
}

impl BudgetError {
    pub fn category_not_found(category_id: &str) -> Self {
        Self::CategoryNotFound { category_id: category_id.to_string() }
    }
}
