use rust_decimal::Decimal;

use crate::models::Transaction;

/// 10,000.00
pub const DEFAULT_HIGH_RISK_THRESHOLD: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 2);

/// Flags unusually large debits.
///
/// A transaction is high-risk when it has a positive charge at or above
/// `charge_threshold`. Credits never make a transaction high-risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiskPolicy {
    pub charge_threshold: Decimal
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            charge_threshold: DEFAULT_HIGH_RISK_THRESHOLD
        }
    }
}

impl RiskPolicy {
    pub fn is_high_risk(&self, transaction: &Transaction) -> bool {
        transaction.charges > Decimal::ZERO && transaction.charges >= self.charge_threshold
    }
}

pub fn high_risk_transactions<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    policy: &RiskPolicy
) -> Vec<&'a Transaction> {
    transactions.into_iter()
        .filter(|transaction| policy.is_high_risk(transaction))
        .collect()
}

pub fn count_high_risk<'a>(transactions: impl IntoIterator<Item = &'a Transaction>, policy: &RiskPolicy) -> usize {
    transactions.into_iter()
        .filter(|transaction| policy.is_high_risk(transaction))
        .count()
}
