use chrono::NaiveDate;

use crate::models::Transaction;

/// Inclusive calendar window, `start <= date <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, counting both ends. Zero when `end`
    /// precedes `start`.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }

    /// Smallest range covering every transaction, if there are any.
    pub fn spanning<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Option<Self> {
        transactions.into_iter().fold(None, |span, transaction| match span {
            None => Some(Self::new(transaction.date, transaction.date)),
            Some(span) => Some(Self::new(span.start.min(transaction.date), span.end.max(transaction.date)))
        })
    }
}

/// Transactions inside `range`, or all of them when there is no range.
pub fn in_range(transactions: &[Transaction], range: Option<DateRange>) -> impl Iterator<Item = &Transaction> {
    transactions.iter()
        .filter(move |transaction| range.is_none_or(|range| range.contains(transaction.date)))
}
