use thiserror::Error;

/// Failure to turn a single raw cell into a typed value.
///
/// These never abort an ingestion; the normalizer drops the offending row
/// and records the error in its skipped-row report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format error: date '{0}' is not in DD/MON form")]
    DateShape(String),
    #[error("Format error: unknown month abbreviation '{0}'")]
    UnknownMonth(String),
    #[error("Format error: invalid day in date '{0}'")]
    InvalidDay(String),
    #[error("Format error: amount '{0}' is not numeric")]
    InvalidAmount(String),
    #[error("Format error: amount '{0}' is outside the supported range")]
    AmountOutOfRange(String)
}
