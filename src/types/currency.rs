use crate::types::errors::FormatError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;

/// Largest magnitude a statement amount may have: 999,999,999,999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(276_447_231, 23_283, 0, false, 2);

/// Most fractional digits a statement amount may carry once trailing zeros
/// are dropped.
pub const MAX_AMOUNT_SCALE: u32 = 4;

/// Parses a statement amount such as `"$1,234.56"`, `"12,50"` or `"1.234,56"`.
///
/// Blank cells are zero. Currency symbols and any other characters that are
/// not digits, separators or a minus sign are discarded before the separators
/// are resolved:
/// - with both `.` and `,` present, whichever comes last is the decimal mark;
/// - with only `,` present, a single comma followed by one or two digits is the
///   decimal mark, otherwise commas group thousands.
///
/// # Errors
/// Returns `FormatError::InvalidAmount` if nothing numeric is left after cleaning,
/// or `FormatError::AmountOutOfRange` if the value fails [`is_supported_amount`].
pub fn parse_currency(value: &str) -> Result<Decimal, FormatError> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let cleaned: String = value.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();

    let normalized = resolve_separators(&cleaned);

    let amount = Decimal::from_str(&normalized)
        .map_err(|_| FormatError::InvalidAmount(value.to_string()))?;

    if !is_supported_amount(amount) {
        return Err(FormatError::AmountOutOfRange(value.to_string()))
    }

    Ok(amount)
}

/// True when `amount` is within [`MAX_AMOUNT`] and [`MAX_AMOUNT_SCALE`].
///
/// Sums, differences and percentages of bounded amounts stay far inside
/// `Decimal`'s range, so the aggregations built on them cannot overflow.
pub fn is_supported_amount(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT && amount.normalize().scale() <= MAX_AMOUNT_SCALE
}

/// Rounds to cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn resolve_separators(cleaned: &str) -> String {
    //NOTE: `cleaned` only holds ASCII at this point, byte offsets are char offsets
    match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(period), Some(comma)) if comma > period => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(comma)) => {
            let fraction_digits = cleaned.len() - comma - 1;

            if cleaned.matches(',').count() == 1 && (1..=2).contains(&fraction_digits) {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        _ => cleaned.to_string()
    }
}
