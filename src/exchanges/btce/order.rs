use crate::core::errors::ExchangeError;
use crate::core::types::{AmountInput, TradeSide};
use crate::exchanges::btce::formatting::{render, truncate_amount};
use crate::exchanges::btce::validation::validate_order;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A trade that passed validation, with rate and amount cut to the pair's precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub pair: String,
    pub side: TradeSide,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl OrderRequest {
    pub fn new(
        pair: &str,
        side: &str,
        rate: impl Into<AmountInput>,
        amount: impl Into<AmountInput>,
    ) -> Result<Self, ExchangeError> {
        let rate: AmountInput = rate.into();
        let amount: AmountInput = amount.into();
        let side = validate_order(pair, side, rate.clone(), amount.clone())?;

        Ok(Self {
            pair: pair.to_string(),
            side,
            rate: truncate_amount(rate, pair)?,
            amount: truncate_amount(amount, pair)?,
        })
    }

    /// Form fields of a trade call, in the order the exchange documents them
    pub fn form_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("pair", self.pair.clone()),
            ("type", self.side.to_string()),
            ("rate", render(self.rate)),
            ("amount", render(self.amount)),
        ]
    }

    /// `pair=..&type=..&rate=..&amount=..`; every value is already URL-safe
    pub fn to_form_body(&self) -> String {
        self.form_params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}
