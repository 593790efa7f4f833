pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ConnectionConfig,
    errors::ExchangeError,
    json::{parse_json_response, JsonValue},
    kernel::{Connection, ConnectionBuilder, ConnectionState},
    types::*,
};
pub use exchanges::btce::{create_btce_connection, OrderRequest};
