use rust_decimal::Decimal;

use crate::errors::{Error, Result, ValidationError};

/// Rounds `value` to `scale` decimals and checks it fits a column of
/// `max_digits` significant digits.
///
/// Rounding is banker's rounding, the `rust_decimal` default.
pub fn fit_decimal(value: Decimal, max_digits: u32, scale: u32, field: &str) -> Result<Decimal> {
    let rounded = value.round_dp(scale).normalize();
    let integer_digits = max_digits.saturating_sub(scale);
    let limit = Decimal::from(10u64.pow(integer_digits));

    if rounded.abs().trunc() >= limit {
        return Err(Error::Validation(ValidationError::PrecisionOverflow {
            field: field.to_string(),
            max_digits,
            scale,
        }));
    }
    Ok(rounded)
}
