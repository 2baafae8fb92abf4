use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::range::{in_range, DateRange};
use crate::models::Transaction;
use crate::types::round_cents;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCashFlowPoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expenses: Decimal,
    /// Cumulative net of this and every earlier day, rounded to cents.
    pub balance: Decimal
}

/// Folds transactions into one point per calendar date, oldest first.
///
/// Positive credits count as income and positive charges as expenses. The
/// running balance accumulates unrounded and each point reports it rounded.
pub fn daily_cash_flow(transactions: &[Transaction], range: Option<DateRange>) -> Vec<DailyCashFlowPoint> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();

    for transaction in in_range(transactions, range) {
        let (income, expenses) = days.entry(transaction.date).or_default();

        if transaction.credits > Decimal::ZERO {
            *income += transaction.credits;
        }

        if transaction.charges > Decimal::ZERO {
            *expenses += transaction.charges;
        }
    }

    let mut balance = Decimal::ZERO;

    days.into_iter()
        .map(|(date, (income, expenses))| {
            balance += income - expenses;

            DailyCashFlowPoint {
                date,
                income,
                expenses,
                balance: round_cents(balance)
            }
        })
        .collect()
}
