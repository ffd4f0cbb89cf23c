//! `GET /health` and `GET /config` response models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Per-provider health as reported by `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthReport {
    pub providers: BTreeMap<String, bool>,
}

impl HealthReport {
    pub fn healthy(&self) -> impl Iterator<Item = &str> {
        self.providers
            .iter()
            .filter(|(_, ok)| **ok)
            .map(|(name, _)| name.as_str())
    }

    pub fn all_healthy(&self) -> bool {
        !self.providers.is_empty() && self.providers.values().all(|ok| *ok)
    }
}

/// Service-side configuration from `GET /config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub available_providers: Vec<String>,
    pub warnings: Vec<String>,
    pub routing_rules: Value,
}
