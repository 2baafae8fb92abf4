use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::keywords::KeywordRules;
use crate::models::Transaction;
use crate::types::round_cents;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdownEntry {
    pub name: String,
    pub value: Decimal
}

/// Sums charges per keyword label. Entries appear in the order their label
/// was first seen; values are rounded to cents.
pub fn category_breakdown<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    rules: &KeywordRules
) -> Vec<CategoryBreakdownEntry> {
    let mut entries: Vec<CategoryBreakdownEntry> = Vec::new();

    for transaction in transactions.into_iter().filter(|transaction| transaction.charges > Decimal::ZERO) {
        let label = rules.label_for(&transaction.description);

        match entries.iter_mut().find(|entry| entry.name == label) {
            Some(entry) => entry.value += transaction.charges,
            None => entries.push(CategoryBreakdownEntry {
                name: label.to_string(),
                value: transaction.charges
            })
        }
    }

    for entry in &mut entries {
        entry.value = round_cents(entry.value);
    }

    entries
}
