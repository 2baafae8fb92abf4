mod currency;
mod date;
mod errors;

pub use currency::{is_supported_amount, parse_currency, round_cents, MAX_AMOUNT, MAX_AMOUNT_SCALE};
pub use date::{parse_statement_date, DEFAULT_REFERENCE_YEAR};
pub use errors::FormatError;

/// 1-based line number of the statement row a transaction came from.
pub type TransactionId = usize;
pub type CategoryId = String;
