use rust_decimal::Decimal;
use tracing::debug;

use crate::budget::errors::AssignmentError;
use crate::models::{Assignment, BudgetCategory, Transaction, UNCATEGORIZED};
use crate::types::TransactionId;

/// Assigns every transaction to the first category whose name appears in its
/// description, ignoring case. Category order decides ties, so callers must
/// keep it stable. Transactions matching no category are Uncategorized.
pub fn auto_assign(transactions: &[Transaction], categories: &[BudgetCategory]) -> Vec<Assignment> {
    let keywords: Vec<(String, &BudgetCategory)> = categories.iter()
        .map(|category| (category.name.to_lowercase(), category))
        .collect();

    transactions.iter()
        .map(|transaction| {
            let description = transaction.description.to_lowercase();

            keywords.iter()
                .find(|(keyword, _)| description.contains(keyword.as_str()))
                .map(|(_, category)| Assignment::to_category(transaction, category))
                .unwrap_or_else(|| Assignment::uncategorized(transaction))
        })
        .collect()
}

/// Overrides the category of a single assignment. `None` puts it back to
/// Uncategorized. Every other assignment is returned unchanged.
///
/// # Errors
/// Returns `AssignmentError` if no assignment belongs to `transaction_id` or
/// `category_id` names no category.
pub fn manual_assign(
    assignments: &[Assignment],
    transaction_id: TransactionId,
    category_id: Option<&str>,
    categories: &[BudgetCategory]
) -> Result<Vec<Assignment>, AssignmentError> {
    let category = category_id
        .map(|category_id| {
            categories.iter()
                .find(|category| category.id == category_id)
                .ok_or_else(|| AssignmentError::CategoryNotFound { category_id: category_id.to_string() })
        })
        .transpose()?;

    if !assignments.iter().any(|assignment| assignment.transaction_id == transaction_id) {
        return Err(AssignmentError::TransactionNotFound { transaction_id })
    }

    debug!("Transaction [{transaction_id}] manually assigned to [{}]", category.map_or(UNCATEGORIZED, |category| category.name.as_str()));

    Ok(assignments.iter()
        .map(|assignment| {
            if assignment.transaction_id != transaction_id {
                return assignment.clone()
            }

            let mut updated = assignment.clone();

            match category {
                Some(category) => {
                    updated.category_id = Some(category.id.clone());
                    updated.category_name = category.name.clone();
                }
                None => {
                    updated.category_id = None;
                    updated.category_name = UNCATEGORIZED.to_string();
                }
            }

            updated
        })
        .collect())
}

/// Adds each category's assigned amounts onto its `spent`.
///
/// This is additive: applying the same batch twice counts it twice.
pub fn apply_assignments(categories: &[BudgetCategory], assignments: &[Assignment]) -> Vec<BudgetCategory> {
    categories.iter()
        .map(|category| {
            let assigned: Decimal = assignments.iter()
                .filter(|assignment| assignment.category_id.as_deref() == Some(category.id.as_str()))
                .map(|assignment| assignment.amount)
                .sum();

            BudgetCategory {
                spent: category.spent + assigned,
                ..category.clone()
            }
        })
        .collect()
}
