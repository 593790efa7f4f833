//! JSON decoding with exact decimal numbers.
//!
//! `serde_json` is built with `arbitrary_precision`, so every numeric literal
//! reaches us as its original text. Each one is converted straight to a
//! [`Decimal`] and never touches `f64`.

use crate::core::errors::ExchangeError;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::ops::Index;

/// A parsed JSON document whose numbers are exact decimals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(Decimal),
    String(String),
    Array(Vec<JsonValue>),
    /// Keys keep the order they had in the source text
    Object(IndexMap<String, JsonValue>),
}

static NULL: JsonValue = JsonValue::Null;

impl JsonValue {
    /// Look up a key on an object; `None` for missing keys and non-objects
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub const fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn from_serde(value: Value) -> Result<Self, String> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number_to_decimal(&number)?),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Array(
                items
                    .into_iter()
                    .map(Self::from_serde)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| Self::from_serde(value).map(|value| (key, value)))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl Index<&str> for JsonValue {
    type Output = Self;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for JsonValue {
    type Output = Self;

    fn index(&self, idx: usize) -> &Self::Output {
        match self {
            Self::Array(items) => items.get(idx).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

fn number_to_decimal(number: &Number) -> Result<Decimal, String> {
    let literal = number.to_string();
    let parsed = if literal.contains(['e', 'E']) {
        Decimal::from_scientific(&literal)
    } else {
        Decimal::from_str_exact(&literal)
    };
    parsed.map_err(|e| format!("number {} has no exact decimal form: {}", literal, e))
}

/// Parse a response body, keeping every number as an exact decimal
pub fn parse_json_response(response: &str) -> Result<JsonValue, ExchangeError> {
    let parse_error = |message: String| ExchangeError::JsonParseError {
        message,
        response: response.to_string(),
    };

    let value: Value = serde_json::from_str(response).map_err(|e| parse_error(e.to_string()))?;
    JsonValue::from_serde(value).map_err(parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_numbers_are_exact() {
        let value = parse_json_response(r#"{"a": 0.1, "b": 3}"#).unwrap();

        assert_eq!(value["a"].as_decimal(), Some(dec!(0.1)));
        assert_eq!(value["b"].as_decimal(), Some(dec!(3)));
        assert_eq!(value["a"].as_decimal().unwrap().to_string(), "0.1");
    }

    #[test]
    fn test_keeps_literal_digits() {
        let value = parse_json_response("[1.50000, 0.00000001, 123456789.123456789]").unwrap();

        assert_eq!(value[0].as_decimal().unwrap().to_string(), "1.50000");
        assert_eq!(value[1].as_decimal(), Some(dec!(0.00000001)));
        assert_eq!(value[2].as_decimal(), Some(dec!(123456789.123456789)));
    }

    #[test]
    fn test_scientific_notation() {
        let value = parse_json_response(r#"{"fee": 2e-3, "big": 1.5E2}"#).unwrap();
        assert_eq!(value["fee"].as_decimal(), Some(dec!(0.002)));
        assert_eq!(value["big"].as_decimal(), Some(dec!(150)));
    }

    #[test]
    fn test_nested_structure_and_order() {
        let text = r#"{"success": 1, "return": {"z": "last", "a": [true, null]}}"#;
        let value = parse_json_response(text).unwrap();

        let inner = value["return"].as_object().unwrap();
        let keys: Vec<&str> = inner.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);

        assert_eq!(value["return"]["z"].as_str(), Some("last"));
        assert_eq!(value["return"]["a"][0].as_bool(), Some(true));
        assert!(value["return"]["a"][1].is_null());
        assert!(value["missing"].is_null());
    }

    #[test]
    fn test_malformed_input_carries_response() {
        let err = parse_json_response("<html>rate limited</html>").unwrap_err();

        match &err {
            ExchangeError::JsonParseError { response, .. } => {
                assert_eq!(response, "<html>rate limited</html>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_unrepresentable_number_is_parse_error() {
        let err = parse_json_response("[1e400]").unwrap_err();
        assert!(matches!(err, ExchangeError::JsonParseError { .. }));
    }
}
