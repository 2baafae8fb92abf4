use crate::types::errors::FormatError;
use chrono::NaiveDate;

/// Year assigned to statement dates when the caller does not supply one.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2023;

const MONTHS: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN",
    "JUL", "AGO", "SEP", "OCT", "NOV", "DIC"
];

/// Parses a `DD/MON` statement date (Spanish month abbreviation, any case)
/// into a date within `year`.
///
/// # Errors
/// Returns a `FormatError` when the value has no `/`, the month is not one of
/// `ENE`..`DIC`, or the day does not exist in that month.
pub fn parse_statement_date(value: &str, year: i32) -> Result<NaiveDate, FormatError> {
    let value = value.trim();

    let Some((day, month)) = value.split_once('/') else {
        return Err(FormatError::DateShape(value.to_string()))
    };

    let month = month.trim().to_uppercase();
    let month_index = MONTHS.iter().position(|candidate| *candidate == month)
        .ok_or(FormatError::UnknownMonth(month))?;

    let day: u32 = day.trim().parse()
        .map_err(|_| FormatError::InvalidDay(value.to_string()))?;

    NaiveDate::from_ymd_opt(year, month_index as u32 + 1, day)
        .ok_or_else(|| FormatError::InvalidDay(value.to_string()))
}
