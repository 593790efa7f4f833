use crate::core::errors::ExchangeError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a trade request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(ExchangeError::InvalidTradeType(format!(
                "Unrecognized trade type: '{}'",
                other
            ))),
        }
    }
}

/// Amount or rate as accepted at the API boundary.
///
/// Every representation is turned into an exact [`Decimal`] through its text
/// form. Floats are rendered with their shortest round-trip representation
/// first, so `0.1_f64` becomes exactly `0.1` rather than the nearest binary
/// value.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Decimal(Decimal),
    Text(String),
    Integer(i64),
    Float(f64),
}

impl AmountInput {
    pub fn to_decimal(&self) -> Result<Decimal, ExchangeError> {
        match self {
            Self::Decimal(value) => Ok(*value),
            Self::Integer(value) => Ok(Decimal::from(*value)),
            Self::Text(text) => conversion::string_to_decimal(text),
            Self::Float(value) => {
                if !value.is_finite() {
                    return Err(ExchangeError::InvalidAmount(format!(
                        "non-finite value {}",
                        value
                    )));
                }
                conversion::string_to_decimal(&value.to_string())
            }
        }
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&Decimal> for AmountInput {
    fn from(value: &Decimal) -> Self {
        Self::Decimal(*value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for AmountInput {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Strict text-to-decimal helpers
pub mod conversion {
    use super::*;

    /// Parse plain or scientific decimal text.
    ///
    /// Text with more fractional digits than a `Decimal` can hold is
    /// rejected, never rounded.
    pub fn string_to_decimal(s: &str) -> Result<Decimal, ExchangeError> {
        let trimmed = s.trim();
        let parsed = if trimmed.contains(['e', 'E']) {
            Decimal::from_scientific(trimmed)
        } else {
            Decimal::from_str_exact(trimmed)
        };
        parsed.map_err(|e| ExchangeError::InvalidAmount(format!("{:?}: {}", s, e)))
    }
}
