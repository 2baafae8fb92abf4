//! Pure folds over a normalized transaction sequence.
//!
//! Nothing here fails or keeps state: the same input always yields the same
//! output, which is what lets the engine memoize results.

mod breakdown;
mod cash_flow;
mod keywords;
mod metrics;
mod range;
mod risk;
mod trends;

pub use breakdown::{category_breakdown, CategoryBreakdownEntry};
pub use cash_flow::{daily_cash_flow, DailyCashFlowPoint};
pub use keywords::{KeywordRule, KeywordRules, FALLBACK_LABEL};
pub use metrics::{current_balance, financial_summary, recent_transactions, FinancialSummary};
pub use range::{in_range, DateRange};
pub use risk::{count_high_risk, high_risk_transactions, RiskPolicy, DEFAULT_HIGH_RISK_THRESHOLD};
pub use trends::{monthly_trend, week_over_week, week_over_week_trend, MonthlyExpense, MonthlyTrend, SpendingTrend, WeekOverWeek};
