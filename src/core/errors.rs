use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Invalid trade pair: {0}")]
    InvalidTradePair(String),

    #[error("Invalid trade type: {0}")]
    InvalidTradeType(String),

    #[error("Invalid trade amount: {0}")]
    InvalidTradeAmount(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Error while attempting to parse JSON response: {message}\nResponse:\n{response:?}")]
    JsonParseError { message: String, response: String },

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// Whether the failure came from the network layer and is worth retrying
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }
}

