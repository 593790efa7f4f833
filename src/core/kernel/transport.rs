use crate::core::config::ConnectionConfig;
use crate::core::errors::ExchangeError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, SET_COOKIE};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{instrument, trace};

/// Raw HTTP response as seen by the connection layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// All `Set-Cookie` values joined with `", "`, empty when absent
    pub set_cookie: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// One open HTTP handle to the exchange.
///
/// Implementations report any network-level failure (refused connection,
/// timeout, reset while reading the body) as [`ExchangeError::TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Unauthenticated GET
    async fn get(&self, path: &str) -> Result<HttpResponse, ExchangeError>;

    /// POST `body` with exactly the given headers
    async fn post(
        &self,
        path: &str,
        body: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, ExchangeError>;
}

/// Builds fresh transport handles; used on first connect and after every failure
pub trait Connector: Send + Sync {
    type Handle: Transport;

    fn connect(&self, config: &ConnectionConfig) -> Result<Self::Handle, ExchangeError>;
}

/// Production connector backed by reqwest
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl Connector for ReqwestConnector {
    type Handle = ReqwestTransport;

    fn connect(&self, config: &ConnectionConfig) -> Result<Self::Handle, ExchangeError> {
        ReqwestTransport::new(config)
    }
}

/// HTTPS handle holding a single keep-alive connection to the exchange host
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    pub fn new(config: &ConnectionConfig) -> Result<Self, ExchangeError> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .pool_max_idle_per_host(1)
            .user_agent(&config.user_agent)
            .https_only(true)
            .build()
            .map_err(|e| {
                ExchangeError::TransportError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_headers(headers: &HashMap<String, String>) -> Result<HeaderMap, ExchangeError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ExchangeError::InvalidParameters(format!("Invalid header name {:?}: {}", key, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ExchangeError::InvalidParameters(format!("Invalid value for header {}: {}", key, e))
            })?;
            map.insert(name, value);
        }
        Ok(map)
    }

    /// Read the whole body so the connection goes back to the pool clean
    #[instrument(skip(response), fields(status = %response.status()))]
    async fn read_response(response: Response) -> Result<HttpResponse, ExchangeError> {
        let status = response.status().as_u16();
        let set_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");

        let body = response.bytes().await.map_err(|e| {
            ExchangeError::TransportError(format!("Failed to read response body: {}", e))
        })?;

        trace!(bytes = body.len(), "Response body read");

        Ok(HttpResponse {
            status,
            set_cookie,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get(&self, path: &str) -> Result<HttpResponse, ExchangeError> {
        let response = self
            .client
            .get(self.build_url(path))
            .send()
            .await
            .map_err(|e| ExchangeError::TransportError(format!("Request failed: {}", e)))?;

        Self::read_response(response).await
    }

    #[instrument(skip(self, body, headers), fields(base_url = %self.base_url, header_count = headers.len()))]
    async fn post(
        &self,
        path: &str,
        body: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, ExchangeError> {
        let response = self
            .client
            .post(self.build_url(path))
            .headers(Self::build_headers(headers)?)
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| ExchangeError::TransportError(format!("Request failed: {}", e)))?;

        Self::read_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        let config = ConnectionConfig::new("btc-e.com".to_string()).with_timeout(5);
        let transport = ReqwestConnector.connect(&config).unwrap();
        assert_eq!(transport.build_url("/tapi"), "https://btc-e.com/tapi");
    }

    #[test]
    fn test_header_conversion() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/x-www-form-urlencoded".to_string());
        headers.insert("Cookie".to_string(), String::new());

        let map = ReqwestTransport::build_headers(&headers).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("cookie").unwrap(), "");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let mut headers = HashMap::new();
        headers.insert("Bad Header".to_string(), "x".to_string());

        let result = ReqwestTransport::build_headers(&headers);
        assert!(matches!(result, Err(ExchangeError::InvalidParameters(_))));
    }

    #[test]
    fn test_http_response_helpers() {
        let response = HttpResponse {
            status: 503,
            set_cookie: String::new(),
            body: b"busy".to_vec(),
        };
        assert!(!response.is_success());
        assert_eq!(response.body_text(), "busy");
    }
}
