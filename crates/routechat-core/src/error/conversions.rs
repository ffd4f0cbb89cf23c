//! From trait implementations for RouteChatError conversions

use super::types::RouteChatError;

impl From<anyhow::Error> for RouteChatError {
    fn from(error: anyhow::Error) -> Self {
        Self::other(error.to_string())
    }
}

impl From<std::io::Error> for RouteChatError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for RouteChatError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<toml::de::Error> for RouteChatError {
    fn from(error: toml::de::Error) -> Self {
        Self::config_with_context(error.to_string(), "Parsing TOML")
    }
}

impl From<toml::ser::Error> for RouteChatError {
    fn from(error: toml::ser::Error) -> Self {
        Self::config_with_context(error.to_string(), "Serializing TOML")
    }
}

impl From<serde_yaml::Error> for RouteChatError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config_with_context(error.to_string(), "Processing YAML")
    }
}

impl From<reqwest::Error> for RouteChatError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout {
                seconds: 0,
                context: Some(error.to_string()),
            };
        }
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::Http {
            message: error.to_string(),
            url,
            status_code,
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnifiedError;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RouteChatError = io.into();
        assert_eq!(err.error_code(), "ROUTECHAT_IO");
        assert!(err.message().contains("missing"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: RouteChatError = json_err.into();
        assert!(matches!(err, RouteChatError::Json { .. }));
    }

    #[test]
    fn test_toml_error_conversion_is_config() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: RouteChatError = toml_err.into();
        assert_eq!(err.error_code(), "ROUTECHAT_CONFIG");
        assert_eq!(err.context(), Some("Parsing TOML"));
    }
}
