pub mod formatting;
pub mod order;
pub mod pairs;
pub mod validation;

use crate::core::{
    config::ConnectionConfig,
    errors::ExchangeError,
    kernel::{Connection, ConnectionBuilder, TokenExtractor},
};
use std::sync::Arc;

pub use formatting::{format_currency, format_currency_digits, truncate_amount, truncate_amount_digits};
pub use order::OrderRequest;
pub use pairs::{digits_for, is_valid, min_order_for, PairSpec};
pub use validation::{validate_order, validate_pair};

/// Authenticated trade API endpoint
pub const TRADE_API_PATH: &str = "/tapi";

/// Factory function to create a BTC-e connection with the default cookie matchers
pub fn create_btce_connection(config: ConnectionConfig) -> Result<Connection, ExchangeError> {
    ConnectionBuilder::new(config).build()
}

/// Factory function to create a BTC-e connection with custom cookie matchers
pub fn create_btce_connection_with_extractor(
    config: ConnectionConfig,
    extractor: Arc<dyn TokenExtractor>,
) -> Result<Connection, ExchangeError> {
    ConnectionBuilder::new(config)
        .with_extractor(extractor)
        .build()
}
