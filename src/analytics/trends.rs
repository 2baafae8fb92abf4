use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analytics::range::DateRange;
use crate::models::Transaction;
use crate::types::round_cents;

const MONTH_LABELS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyExpense {
    /// 1 = January.
    pub month: u32,
    pub label: &'static str,
    pub expenses: Decimal
}

pub type MonthlyTrend = [MonthlyExpense; 12];

/// Charges bucketed by calendar month regardless of year. All twelve months
/// are always present.
pub fn monthly_trend<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> MonthlyTrend {
    let mut months: MonthlyTrend = std::array::from_fn(|index| MonthlyExpense {
        month: index as u32 + 1,
        label: MONTH_LABELS[index],
        expenses: Decimal::ZERO
    });

    for transaction in transactions {
        months[transaction.date.month0() as usize].expenses += transaction.charges;
    }

    months
}

/// Spending in the 7 days ending on `now` against the 7 days before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekOverWeek {
    pub current_week: Decimal,
    pub previous_week: Decimal
}

/// Percent change in weekly spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingTrend {
    /// `(current - previous) / previous * 100`, rounded to cents.
    Change(Decimal),
    /// Nothing was spent in the previous week, so no ratio exists.
    NoPriorSpending { current: Decimal }
}

impl SpendingTrend {
    pub fn percent(&self) -> Option<Decimal> {
        match self {
            SpendingTrend::Change(percent) => Some(*percent),
            SpendingTrend::NoPriorSpending { .. } => None
        }
    }
}

impl Display for SpendingTrend {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SpendingTrend::Change(percent) if percent.is_sign_negative() => write!(formatter, "{:.2}% decrease", percent.abs()),
            SpendingTrend::Change(percent) => write!(formatter, "{percent:.2}% increase"),
            SpendingTrend::NoPriorSpending { .. } => write!(formatter, "no spending in the previous week")
        }
    }
}

impl WeekOverWeek {
    pub fn trend(&self) -> SpendingTrend {
        if self.previous_week.is_zero() {
            return SpendingTrend::NoPriorSpending { current: self.current_week }
        }

        let change = (self.current_week - self.previous_week) / self.previous_week * Decimal::ONE_HUNDRED;

        SpendingTrend::Change(round_cents(change))
    }
}

/// Sums charges for the window `now-6 ..= now` and the window `now-13 ..= now-7`.
/// Transactions dated after `now` belong to neither.
pub fn week_over_week<'a>(transactions: impl IntoIterator<Item = &'a Transaction>, now: NaiveDate) -> WeekOverWeek {
    let days_before = |days: u64| now.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);

    let current = DateRange::new(days_before(6), now);
    let previous = DateRange::new(days_before(13), days_before(7));

    let mut summary = WeekOverWeek {
        current_week: Decimal::ZERO,
        previous_week: Decimal::ZERO
    };

    for transaction in transactions {
        if current.contains(transaction.date) {
            summary.current_week += transaction.charges;
        } else if previous.contains(transaction.date) {
            summary.previous_week += transaction.charges;
        }
    }

    summary
}

pub fn week_over_week_trend<'a>(transactions: impl IntoIterator<Item = &'a Transaction>, now: NaiveDate) -> SpendingTrend {
    week_over_week(transactions, now).trend()
}
