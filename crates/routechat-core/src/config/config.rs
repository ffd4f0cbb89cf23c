//! Client configuration model

use super::logging_config::LoggingConfig;
use super::timeouts;
use crate::error::{RouteChatError, RouteChatResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default location of the routing service API
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Provider to request when the user does not pick one; `None` lets the
    /// service route automatically
    pub default_provider: Option<String>,
    pub server: ServerConfig,
    pub timeouts: TimeoutConfig,
    pub logging: LoggingConfig,
}

/// Where and how to reach the routing service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    /// Extra headers sent with every request
    pub headers: HashMap<String, String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: HashMap::new(),
        }
    }
}

impl ServerConfig {
    /// Join an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Network timeouts, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub connect_secs: u64,
    /// Whole-request limit for the small JSON endpoints
    pub request_secs: u64,
    /// Longest silence tolerated between two chunks of a streamed answer
    pub stream_idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: timeouts::CONNECT_SECS,
            request_secs: timeouts::REQUEST_SECS,
            stream_idle_secs: timeouts::STREAM_IDLE_SECS,
        }
    }
}

impl TimeoutConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    pub fn stream_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_idle_secs)
    }
}

impl ClientConfig {
    /// Check the configuration for values the client cannot work with
    pub fn validate(&self) -> RouteChatResult<()> {
        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            return Err(RouteChatError::config("server.base_url must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RouteChatError::config(format!(
                "server.base_url must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        for (name, value) in [
            ("timeouts.connect_secs", self.timeouts.connect_secs),
            ("timeouts.request_secs", self.timeouts.request_secs),
            ("timeouts.stream_idle_secs", self.timeouts.stream_idle_secs),
        ] {
            if value == 0 {
                return Err(RouteChatError::config(format!(
                    "{} must be greater than zero",
                    name
                )));
            }
        }

        if let Some(provider) = &self.default_provider {
            if provider.trim().is_empty() {
                return Err(RouteChatError::config(
                    "default_provider must not be blank; omit it for automatic routing",
                ));
            }
        }

        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.default_provider, None);
    }

    #[test]
    fn test_endpoint_joining() {
        let mut server = ServerConfig::default();
        assert_eq!(server.endpoint("/query"), "http://localhost:5000/api/query");

        server.base_url = "https://router.example.com/".to_string();
        assert_eq!(server.endpoint("providers"), "https://router.example.com/providers");
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = ClientConfig::default();
        config.server.base_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());

        config.server.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let mut config = ClientConfig::default();
        config.timeouts.stream_idle_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("stream_idle_secs"));
    }

    #[test]
    fn test_validate_rejects_blank_provider() {
        let config = ClientConfig {
            default_provider: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"server": {"base_url": "http://10.0.0.2:8080/api"}}"#)
                .unwrap();
        assert_eq!(config.server.base_url, "http://10.0.0.2:8080/api");
        assert_eq!(config.timeouts, TimeoutConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }
}
