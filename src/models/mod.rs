mod assignment;
mod category;
mod transaction;

pub use assignment::{Assignment, UNCATEGORIZED};
pub use category::BudgetCategory;
pub use transaction::Transaction;
