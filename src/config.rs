//! Configuration Module
//!
//! Loads the cache client and local store settings from environment variables.

use std::env;
use std::time::Duration;

/// Default entry lifetime in seconds when `CACHE_TTL` is unset.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Default namespace prepended to every physical key.
pub const DEFAULT_KEY_PREFIX: &str = "app";

/// Default per-request timeout against the remote store.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

/// Cache client configuration.
///
/// `rest_url` and `rest_token` are both required for the cache to be enabled.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Base URL of the store's REST endpoint
    pub rest_url: Option<String>,
    /// Bearer token for the store
    pub rest_token: Option<String>,
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// Namespace used when callers give no prefix
    pub key_prefix: String,
    /// Timeout applied to every remote call
    pub request_timeout: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTASH_REDIS_REST_URL` - Store base URL (absent disables the cache)
    /// - `UPSTASH_REDIS_REST_TOKEN` - Store bearer token (absent disables the cache)
    /// - `CACHE_TTL` - Default TTL in seconds (default: 3600)
    /// - `CACHE_KEY_PREFIX` - Default key namespace (default: "app")
    /// - `CACHE_REQUEST_TIMEOUT_MS` - Per-request timeout (default: 5000)
    pub fn from_env() -> Self {
        Self {
            rest_url: non_empty_var("UPSTASH_REDIS_REST_URL"),
            rest_token: non_empty_var("UPSTASH_REDIS_REST_TOKEN"),
            default_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ttl| *ttl > 0)
                .unwrap_or(DEFAULT_TTL_SECS),
            key_prefix: non_empty_var("CACHE_KEY_PREFIX")
                .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            request_timeout: Duration::from_millis(
                env::var("CACHE_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            ),
        }
    }

    /// Builds a config pointing at `url` with `token`, other fields defaulted.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            rest_url: Some(url.into()),
            rest_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Overrides the default TTL.
    pub fn with_default_ttl(mut self, ttl: u64) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Returns the URL and token when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.rest_url.as_deref(), self.rest_token.as_deref()) {
            (Some(url), Some(token)) => Some((url, token)),
            _ => None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            rest_url: None,
            rest_token: None,
            default_ttl: DEFAULT_TTL_SECS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }
}

/// Local store server configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Bearer token clients must present
    pub token: String,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl StoreConfig {
    /// Creates a new StoreConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_PORT` - HTTP server port (default: 8079)
    /// - `STORE_TOKEN` - Accepted bearer token (default: "local-dev-token")
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("STORE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            token: non_empty_var("STORE_TOKEN").unwrap_or(defaults.token),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            server_port: 8079,
            token: "local-dev-token".to_string(),
            cleanup_interval: 1,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert!(config.rest_url.is_none());
        assert!(config.rest_token.is_none());
        assert_eq!(config.default_ttl, 3600);
        assert_eq!(config.key_prefix, "app");
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_cache_config_new_has_credentials() {
        let config = CacheConfig::new("http://localhost:8079", "secret").with_default_ttl(10);
        assert_eq!(
            config.credentials(),
            Some(("http://localhost:8079", "secret"))
        );
        assert_eq!(config.default_ttl, 10);
    }

    #[test]
    fn test_credentials_require_both() {
        let config = CacheConfig {
            rest_url: Some("http://localhost".to_string()),
            ..CacheConfig::default()
        };
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_store_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.server_port, 8079);
        assert_eq!(config.token, "local-dev-token");
        assert_eq!(config.cleanup_interval, 1);
    }

    #[test]
    fn test_store_config_from_env_defaults() {
        env::remove_var("STORE_PORT");
        env::remove_var("STORE_TOKEN");
        env::remove_var("CLEANUP_INTERVAL");

        let config = StoreConfig::from_env();
        assert_eq!(config.server_port, 8079);
        assert_eq!(config.token, "local-dev-token");
        assert_eq!(config.cleanup_interval, 1);
    }
}
