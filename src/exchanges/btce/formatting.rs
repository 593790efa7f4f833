//! Truncation and rendering of amounts to a pair's precision.
//!
//! Values are always cut toward zero, never rounded to nearest: an order must
//! not exceed what the caller asked for.

use crate::core::errors::ExchangeError;
use crate::core::types::AmountInput;
use crate::exchanges::btce::pairs;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale a `Decimal` can carry
pub const MAX_DIGITS: u32 = 28;

/// Truncate toward zero to exactly `digits` fractional places.
///
/// The result always has scale `digits`, so `1.5` at 3 digits is `1.500`.
/// Values whose integer part leaves no room for that many digits are
/// rejected with `InvalidParameters`.
pub fn truncate_amount_digits(
    value: impl Into<AmountInput>,
    digits: u32,
) -> Result<Decimal, ExchangeError> {
    if digits > MAX_DIGITS {
        return Err(ExchangeError::InvalidParameters(format!(
            "{} fractional digits requested, at most {} supported",
            digits, MAX_DIGITS
        )));
    }

    let value: AmountInput = value.into();
    let value = value.to_decimal()?;
    let mut truncated = value.round_dp_with_strategy(digits, RoundingStrategy::ToZero);
    truncated.rescale(digits);
    if truncated.scale() != digits {
        return Err(ExchangeError::InvalidParameters(format!(
            "{} cannot carry {} fractional digits",
            value, digits
        )));
    }
    Ok(truncated)
}

/// Truncate to the pair's precision
pub fn truncate_amount(value: impl Into<AmountInput>, pair: &str) -> Result<Decimal, ExchangeError> {
    truncate_amount_digits(value, pairs::digits_for(pair)?)
}

/// Truncate, then render with trailing zeros removed down to one fractional digit
pub fn format_currency_digits(
    value: impl Into<AmountInput>,
    digits: u32,
) -> Result<String, ExchangeError> {
    truncate_amount_digits(value, digits).map(render)
}

pub fn format_currency(value: impl Into<AmountInput>, pair: &str) -> Result<String, ExchangeError> {
    format_currency_digits(value, pairs::digits_for(pair)?)
}

/// Minimal text for an already truncated value: `1.50000` -> `1.5`, `2` -> `2.0`
pub(crate) fn render(value: Decimal) -> String {
    let mut text = value.to_string();
    let Some(dot) = text.find('.') else {
        text.push_str(".0");
        return text;
    };

    while text.ends_with('0') && text.len() > dot + 2 {
        text.pop();
    }
    text
}
