use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::range::{in_range, DateRange};
use crate::models::Transaction;
use crate::types::round_cents;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    /// Absent when there is no day to average over.
    pub average_daily_spending: Option<Decimal>
}

/// Totals for the transactions inside `range`.
///
/// Average daily spending divides expenses by the days in `range`, both ends
/// included. Without a range the span from the earliest to the latest
/// transaction is used.
pub fn financial_summary(transactions: &[Transaction], range: Option<DateRange>) -> FinancialSummary {
    let selected: Vec<&Transaction> = in_range(transactions, range).collect();

    let total_income: Decimal = selected.iter().map(|transaction| transaction.credits).sum();
    let total_expenses: Decimal = selected.iter().map(|transaction| transaction.charges).sum();

    let average_daily_spending = range
        .or_else(|| DateRange::spanning(selected.iter().copied()))
        .map(|span| span.days())
        .filter(|days| *days > 0)
        .map(|days| round_cents(total_expenses / Decimal::from(days)));

    FinancialSummary {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        average_daily_spending
    }
}

/// Credits minus charges across every transaction.
pub fn current_balance<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    transactions.into_iter().map(Transaction::net).sum()
}

/// The `count` newest transactions, newest first. Same-day transactions keep
/// their statement order.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<&Transaction> {
    let mut recent: Vec<&Transaction> = transactions.iter().collect();

    recent.sort_by(|left, right| right.date.cmp(&left.date));
    recent.truncate(count);

    recent
}
