mod assigner;
mod errors;
mod ledger;
#[cfg(test)]
mod tests;

pub use assigner::{apply_assignments, auto_assign, manual_assign};
pub use errors::{AssignmentError, BudgetError};
pub use ledger::{BudgetLedger, CategoryStatus};
