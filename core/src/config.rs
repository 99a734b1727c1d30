//! Client configuration.
//!
//! # Design
//! A `ClientConfig` is plain immutable data. Each `MollieClient` owns its
//! own copy, so building a second client with another key never affects
//! requests issued by the first.

use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;

/// Base URL of the Mollie REST API.
pub const API_BASE_URL: &str = "https://api.mollie.nl/v1";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "MOLLIE_APIKEY";

/// Environment variable holding the timeout in milliseconds.
pub const TIMEOUT_VAR: &str = "MOLLIE_TIMEOUT";

const USER_AGENT: &str = concat!("mollie-core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MOLLIE_TIMEOUT must be a whole number of milliseconds, got {value:?}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: Option<String>,
    timeout: Duration,
    base_url: String,
}

// The key stays out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            base_url: API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    /// Read `MOLLIE_APIKEY` and `MOLLIE_TIMEOUT` from the process
    /// environment, falling back to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(key) = lookup(API_KEY_VAR) {
            config.api_key = Some(key);
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidTimeout { value: raw.clone(), source })?;
            config.timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the client at another host, e.g. a local mock server. A
    /// trailing slash is stripped.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers sent with every request. An absent key still produces an
    /// `Authorization` header with a blank bearer token; the API answers it
    /// with an authentication error.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key.as_deref().unwrap_or_default()),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_key(), None);
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config.base_url(), "https://api.mollie.nl/v1");
    }

    #[test]
    fn options_merge_over_defaults() {
        let config = ClientConfig::new("test_abc");
        assert_eq!(config.api_key(), Some("test_abc"));
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        let config = ClientConfig::default().with_timeout(Duration::from_millis(250));
        assert_eq!(config.api_key(), None);
        assert_eq!(config.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn headers_carry_bearer_key() {
        let headers = ClientConfig::new("test_abc").headers();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer test_abc".to_string())));
        assert!(headers.contains(&("Accept".to_string(), "application/json".to_string())));
        let agent = headers.iter().find(|(k, _)| k == "User-Agent").unwrap();
        assert!(agent.1.starts_with("mollie-core/"));
    }

    #[test]
    fn missing_key_sends_blank_bearer() {
        let headers = ClientConfig::default().headers();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer ".to_string())));

        let headers = ClientConfig::new("").headers();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer ".to_string())));
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:3000/v1/");
        assert_eq!(config.base_url(), "http://127.0.0.1:3000/v1");
    }

    #[test]
    fn from_lookup_reads_key_and_timeout() {
        let config =
            ClientConfig::from_lookup(lookup(&[("MOLLIE_APIKEY", "live_x"), ("MOLLIE_TIMEOUT", "1500")]))
                .unwrap();
        assert_eq!(config.api_key(), Some("live_x"));
        assert_eq!(config.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn from_lookup_uses_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn from_lookup_rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("MOLLIE_TIMEOUT", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { ref value, .. } if value == "soon"));
    }

    #[test]
    fn debug_redacts_key() {
        let rendered = format!("{:?}", ClientConfig::new("secret_key"));
        assert!(!rendered.contains("secret_key"));
    }
}
