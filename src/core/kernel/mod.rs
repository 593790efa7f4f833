//! Transport kernel for the exchange connection
//!
//! The kernel is organized around three pieces:
//!
//! ## Transport
//! - `Transport`: one open HTTP handle (`GET` for the handshake, `POST` for API calls)
//! - `Connector`: builds fresh handles on first use and after failures
//! - `ReqwestConnector` / `ReqwestTransport`: the HTTPS implementation
//!
//! ## Cookie handshake
//! - `TokenExtractor`: pluggable matchers for the two cookie fragments
//! - `RegexTokenExtractor`: matchers for the exchange's landing page
//!
//! ## Connection
//! - `Connection`: lazy handshake, request pipeline and reset-on-failure
//!
//! # Example
//! ```rust,no_run
//! use btce::core::config::ConnectionConfig;
//! use btce::core::kernel::Connection;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = Connection::new(ConnectionConfig::default())?;
//! let info = conn
//!     .send_json("/tapi", "method=getInfo&nonce=1", &[("Key", "api-key"), ("Sign", "...")], true)
//!     .await?;
//! println!("{:?}", info["return"]["funds"]["btc"].as_decimal());
//! # Ok(())
//! # }
//! ```
pub mod connection;
pub mod cookie;
pub mod transport;

pub use connection::{Connection, ConnectionBuilder, ConnectionState, FORM_CONTENT_TYPE};
pub use cookie::{compose_cookie, RegexTokenExtractor, TokenExtractor};
pub use transport::{Connector, HttpResponse, ReqwestConnector, ReqwestTransport, Transport};
