//! Logging configuration

use crate::error::{RouteChatError, RouteChatResult};
use serde::{Deserialize, Serialize};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Logging configuration
///
/// `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Merge with another logging config; empty fields do not override
    pub fn merge(&mut self, other: LoggingConfig) {
        if !other.level.is_empty() {
            self.level = other.level;
        }
        if !other.format.is_empty() {
            self.format = other.format;
        }
    }

    pub fn validate(&self) -> RouteChatResult<()> {
        if !LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(RouteChatError::config(format!(
                "Invalid log level '{}', expected one of: {}",
                self.level,
                LEVELS.join(", ")
            )));
        }
        if !FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(RouteChatError::config(format!(
                "Invalid log format '{}', expected one of: {}",
                self.format,
                FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}
