use serde::{Deserialize, Serialize};
use std::env;

/// Default exchange host
pub const DEFAULT_HOST: &str = "btc-e.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    /// Connect/read timeout applied to every request
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Keep a previously fetched cookie when the transport is rebuilt
    pub keep_cookie_on_reconnect: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST.to_string())
    }
}

impl ConnectionConfig {
    /// Create a new configuration for the given host
    #[must_use]
    pub fn new(host: String) -> Self {
        Self {
            host,
            timeout_seconds: 30,
            user_agent: "btce-rs/0.1".to_string(),
            keep_cookie_on_reconnect: false,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_HOST` (optional, defaults to `btc-e.com`)
    /// - `{PREFIX}_TIMEOUT` (optional, seconds, defaults to 30)
    /// - `{PREFIX}_KEEP_COOKIE` (optional, defaults to false)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let host_var = format!("{}_HOST", prefix);
        let timeout_var = format!("{}_TIMEOUT", prefix);
        let keep_cookie_var = format!("{}_KEEP_COOKIE", prefix);

        let mut config = Self::new(env::var(&host_var).unwrap_or_else(|_| DEFAULT_HOST.to_string()));

        if let Ok(raw) = env::var(&timeout_var) {
            config.timeout_seconds = raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{} = {:?}: {}", timeout_var, raw, e))
            })?;
        }

        if let Ok(raw) = env::var(&keep_cookie_var) {
            config.keep_cookie_on_reconnect = raw.parse::<bool>().map_err(|e| {
                ConfigError::InvalidConfiguration(format!("{} = {:?}: {}", keep_cookie_var, raw, e))
            })?;
        }

        if config.host.is_empty() {
            return Err(ConfigError::MissingEnvironmentVariable(host_var));
        }

        Ok(config)
    }

    /// Create configuration from a .env file and environment variables
    ///
    /// A missing .env file is not an error; system environment variables are
    /// used as-is in that case.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Set the connect/read timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    #[must_use]
    pub const fn keep_cookie_on_reconnect(mut self, keep: bool) -> Self {
        self.keep_cookie_on_reconnect = keep;
        self
    }

    /// HTTPS origin requests are sent to
    pub fn base_url(&self) -> String {
        format!("https://{}", self.host)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.host, "btc-e.com");
        assert_eq!(config.timeout_seconds, 30);
        assert!(!config.keep_cookie_on_reconnect);
        assert_eq!(config.base_url(), "https://btc-e.com");
    }

    #[test]
    fn test_builder_setters() {
        let config = ConnectionConfig::new("example.org".to_string())
            .with_timeout(5)
            .with_user_agent("test/1.0".to_string())
            .keep_cookie_on_reconnect(true);

        assert_eq!(config.base_url(), "https://example.org");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.user_agent, "test/1.0");
        assert!(config.keep_cookie_on_reconnect);
    }

    #[test]
    fn test_from_env() {
        env::set_var("BTCE_CFG_TEST_HOST", "mirror.example");
        env::set_var("BTCE_CFG_TEST_TIMEOUT", "12");
        env::set_var("BTCE_CFG_TEST_KEEP_COOKIE", "true");

        let config = ConnectionConfig::from_env("btce_cfg_test").unwrap();
        assert_eq!(config.host, "mirror.example");
        assert_eq!(config.timeout_seconds, 12);
        assert!(config.keep_cookie_on_reconnect);
    }

    #[test]
    fn test_from_env_rejects_bad_timeout() {
        env::set_var("BTCE_CFG_BAD_TIMEOUT", "soon");
        let result = ConnectionConfig::from_env("btce_cfg_bad");
        assert!(matches!(result, Err(ConfigError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_from_env_rejects_bad_keep_cookie() {
        env::set_var("BTCE_CFG_BAD_FLAG_KEEP_COOKIE", "yes");
        let result = ConnectionConfig::from_env("btce_cfg_bad_flag");

        match result {
            Err(ConfigError::InvalidConfiguration(message)) => {
                assert!(message.contains("BTCE_CFG_BAD_FLAG_KEEP_COOKIE"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
