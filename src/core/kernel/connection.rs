use crate::core::config::ConnectionConfig;
use crate::core::errors::ExchangeError;
use crate::core::json::{parse_json_response, JsonValue};
use crate::core::kernel::cookie::{cookie_from_response, RegexTokenExtractor, TokenExtractor};
use crate::core::kernel::transport::{Connector, ReqwestConnector, Transport};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// Content type of every POST body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Lifecycle of a [`Connection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport handle; the next request reconnects
    Disconnected,
    /// Handle open, no cookie fetched yet
    Connected,
    /// Handle open and cookie captured
    Authenticated,
}

/// Builder for [`Connection`] instances
pub struct ConnectionBuilder {
    config: ConnectionConfig,
    extractor: Arc<dyn TokenExtractor>,
}

impl ConnectionBuilder {
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            extractor: Arc::new(RegexTokenExtractor),
        }
    }

    /// Replace the cookie fragment matchers
    pub fn with_extractor(mut self, extractor: Arc<dyn TokenExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Build a connection over HTTPS
    pub fn build(self) -> Result<Connection<ReqwestConnector>, ExchangeError> {
        self.build_with(ReqwestConnector)
    }

    /// Build a connection over a custom transport
    pub fn build_with<C: Connector>(self, connector: C) -> Result<Connection<C>, ExchangeError> {
        let handle = connector.connect(&self.config)?;
        debug!(host = %self.config.host, "Connection established");

        Ok(Connection {
            config: self.config,
            connector,
            extractor: self.extractor,
            handle: Some(handle),
            cookie: None,
            reconnect_count: 0,
        })
    }
}

/// A single persistent connection to the exchange.
///
/// Requests are strictly sequential: every operation takes `&mut self`, so the
/// cookie handshake runs at most once per handle. Share it between tasks only
/// behind a mutex.
///
/// When the transport fails the handle is dropped and rebuilt before the
/// error is returned. The failed request is never retried here.
pub struct Connection<C: Connector = ReqwestConnector> {
    config: ConnectionConfig,
    connector: C,
    extractor: Arc<dyn TokenExtractor>,
    handle: Option<C::Handle>,
    cookie: Option<String>,
    reconnect_count: u64,
}

impl<C: Connector> std::fmt::Debug for Connection<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("reconnect_count", &self.reconnect_count)
            .finish_non_exhaustive()
    }
}

impl Connection<ReqwestConnector> {
    /// Open an HTTPS connection with the default cookie extractor
    pub fn new(config: ConnectionConfig) -> Result<Self, ExchangeError> {
        ConnectionBuilder::new(config).build()
    }
}

impl<C: Connector> Connection<C> {
    pub fn state(&self) -> ConnectionState {
        match (&self.handle, &self.cookie) {
            (None, _) => ConnectionState::Disconnected,
            (Some(_), None) => ConnectionState::Connected,
            (Some(_), Some(_)) => ConnectionState::Authenticated,
        }
    }

    /// Cookie captured by the handshake, if it has run
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub const fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Number of times the handle has been rebuilt
    pub const fn reconnect_count(&self) -> u64 {
        self.reconnect_count
    }

    /// Drop the current handle and cookie, then open a new handle
    pub fn reconnect(&mut self) -> Result<(), ExchangeError> {
        self.cookie = None;
        self.rebuild()
    }

    /// Close the handle and forget the cookie; the next request reconnects
    pub fn close(&mut self) {
        self.handle = None;
        self.cookie = None;
    }

    /// Replace the handle, leaving the cookie alone
    fn rebuild(&mut self) -> Result<(), ExchangeError> {
        self.handle = None;
        let handle = self.connector.connect(&self.config)?;
        self.handle = Some(handle);
        self.reconnect_count += 1;
        debug!(
            host = %self.config.host,
            reconnect_count = self.reconnect_count,
            "Connection rebuilt"
        );
        Ok(())
    }

    fn recover_from(&mut self, err: &ExchangeError) {
        if !err.is_transport() {
            return;
        }
        warn!(host = %self.config.host, error = %err, "Transport failure, resetting connection");
        if !self.config.keep_cookie_on_reconnect {
            self.cookie = None;
        }
        if let Err(reconnect_err) = self.rebuild() {
            warn!(error = %reconnect_err, "Reconnect failed, will retry on next request");
        }
    }

    fn ensure_handle(&mut self) -> Result<&C::Handle, ExchangeError> {
        if self.handle.is_none() {
            self.rebuild()?;
        }
        self.handle
            .as_ref()
            .ok_or_else(|| ExchangeError::TransportError("connection unavailable".to_string()))
    }

    /// Fetch the anti-bot cookie once per handle
    #[instrument(skip(self), fields(host = %self.config.host))]
    async fn ensure_cookie(&mut self) -> Result<String, ExchangeError> {
        if let Some(cookie) = &self.cookie {
            return Ok(cookie.clone());
        }

        let result = self.ensure_handle()?.get("/").await;
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                self.recover_from(&err);
                return Err(err);
            }
        };

        let cookie = cookie_from_response(
            self.extractor.as_ref(),
            &response.set_cookie,
            &response.body_text(),
        );
        debug!(
            status = response.status,
            has_cookie = !cookie.is_empty(),
            "Cookie handshake complete"
        );
        trace!(cookie = %cookie, "Captured cookie");

        self.cookie = Some(cookie.clone());
        Ok(cookie)
    }

    /// POST `params` to `path` and return the raw response body.
    ///
    /// The form content type is always set; `extra_headers` override it and
    /// each other case-insensitively. With `with_cookie` the handshake runs
    /// first if needed and its result is sent as the `Cookie` header, even
    /// when empty.
    #[instrument(skip(self, params, extra_headers), fields(host = %self.config.host, path = %path))]
    pub async fn send(
        &mut self,
        path: &str,
        params: &str,
        extra_headers: &[(&str, &str)],
        with_cookie: bool,
    ) -> Result<Vec<u8>, ExchangeError> {
        self.ensure_handle()?;

        let mut headers = HashMap::new();
        merge_header(&mut headers, "Content-Type", FORM_CONTENT_TYPE);
        for (key, value) in extra_headers {
            merge_header(&mut headers, key, value);
        }

        if with_cookie {
            let cookie = self.ensure_cookie().await?;
            merge_header(&mut headers, "Cookie", &cookie);
        }

        let result = self.ensure_handle()?.post(path, params, &headers).await;
        match result {
            Ok(response) => {
                if response.is_success() {
                    debug!(status = response.status, bytes = response.body.len(), "Request complete");
                } else {
                    warn!(status = response.status, "Exchange returned non-success status");
                }
                Ok(response.body)
            }
            Err(err) => {
                self.recover_from(&err);
                Err(err)
            }
        }
    }

    /// [`send`](Self::send) and decode the body as exact-decimal JSON
    pub async fn send_json(
        &mut self,
        path: &str,
        params: &str,
        extra_headers: &[(&str, &str)],
        with_cookie: bool,
    ) -> Result<JsonValue, ExchangeError> {
        let body = self.send(path, params, extra_headers, with_cookie).await?;
        let text = String::from_utf8(body).map_err(|e| ExchangeError::JsonParseError {
            message: e.to_string(),
            response: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })?;
        parse_json_response(&text)
    }
}

fn merge_header(headers: &mut HashMap<String, String>, key: &str, value: &str) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(key));
    headers.insert(key.to_string(), value.to_string());
}
