use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::TransactionId;

/// One normalized line of a bank statement.
///
/// `charges` and `credits` are kept exactly as read. A row normally fills only
/// one of them, but nothing here enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Line number of the source row (header is line 1).
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    /// Money leaving the account.
    pub charges: Decimal,
    /// Money entering the account.
    pub credits: Decimal,
    pub rfc: String,
    pub reference: String
}

impl Transaction {
    /// Credits minus charges.
    pub fn net(&self) -> Decimal {
        self.credits - self.charges
    }
}
