//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::time::Duration;

/// Default tournament server URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the tournament server
    pub api_url: String,
    /// WebSocket URL of the live-update channel
    pub live_url: String,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `api_url_override` - Optional server URL override (from CLI args)
    ///
    /// Reads `DARTS_API_URL`, `DARTS_LIVE_URL` and `DARTS_REQUEST_TIMEOUT_SECS`.
    /// The live URL defaults to the server URL with a WebSocket scheme.
    pub fn from_env(api_url_override: Option<String>) -> Self {
        let api_url = api_url_override
            .or_else(|| std::env::var("DARTS_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();

        let live_url = std::env::var("DARTS_LIVE_URL")
            .ok()
            .unwrap_or_else(|| live_url_for(&api_url));

        Self {
            live_url,
            request_timeout: Duration::from_secs(parse_env_or(
                "DARTS_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            api_url,
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "DARTS_API_URL".to_string(),
                reason: format!("Must be an http(s) URL, got '{}'", self.api_url),
            });
        }

        if !(self.live_url.starts_with("ws://") || self.live_url.starts_with("wss://")) {
            return Err(ConfigError::Invalid {
                var: "DARTS_LIVE_URL".to_string(),
                reason: format!("Must be a ws(s) URL, got '{}'", self.live_url),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "DARTS_REQUEST_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// The live-update endpoint served next to the API
pub fn live_url_for(api_url: &str) -> String {
    let ws_url = api_url
        .replace("http://", "ws://")
        .replace("https://", "wss://");
    format!("{}/api/Live", ws_url.trim_end_matches('/'))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            api_url: "http://localhost:5000".to_string(),
            live_url: "ws://localhost:5000/api/Live".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "DARTS_API_URL".to_string(),
            reason: "Must be an http(s) URL".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DARTS_API_URL"));
        assert!(msg.contains("http(s)"));
    }

    #[test]
    fn test_override_wins() {
        let config = ClientConfig::from_env(Some("https://league.example/".to_string()));
        assert_eq!(config.api_url, "https://league.example");
    }

    #[test]
    fn test_live_url_derived_from_api_url() {
        assert_eq!(live_url_for("http://localhost:5000"), "ws://localhost:5000/api/Live");
        assert_eq!(live_url_for("https://league.example/"), "wss://league.example/api/Live");
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_scheme() {
        let config = ClientConfig {
            api_url: "localhost:5000".to_string(),
            ..config()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "DARTS_API_URL"));
    }

    #[test]
    fn test_config_validation_live_url() {
        let config = ClientConfig {
            live_url: "http://localhost:5000/api/Live".to_string(),
            ..config()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "DARTS_LIVE_URL"));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = ClientConfig {
            request_timeout: Duration::ZERO,
            ..config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_or_default() {
        let value: u64 = parse_env_or("DARTS_TEST_UNSET_VARIABLE", 42);
        assert_eq!(value, 42);
    }
}
