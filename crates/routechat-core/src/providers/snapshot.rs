//! `GET /providers` response model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Usage statistics for one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderStats {
    pub provider: String,
    pub model: Option<String>,
    /// Whether the provider initialized on the service side
    pub available: bool,
    pub request_count: u64,
    pub total_cost: f64,
    pub total_tokens: u64,
    pub error_count: u64,
    pub error_rate: f64,
    /// Why the provider is unavailable
    pub error: Option<String>,
}

/// Latest provider roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersSnapshot {
    /// Names of the providers the service can route to
    pub providers: Vec<String>,
    pub stats: Vec<ProviderStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_rules: Option<Value>,
}

impl ProvidersSnapshot {
    pub fn available_count(&self) -> usize {
        self.stats.iter().filter(|s| s.available).count()
    }

    /// Spend across available providers
    pub fn total_cost(&self) -> f64 {
        self.stats
            .iter()
            .filter(|s| s.available)
            .map(|s| s.total_cost)
            .sum()
    }

    pub fn stats_for(&self, provider: &str) -> Option<&ProviderStats> {
        self.stats.iter().find(|s| s.provider == provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "providers": ["openai", "google"],
        "stats": [
            {"provider": "openai", "model": "gpt-4o-mini", "available": true,
             "request_count": 4, "total_cost": 0.0125, "total_tokens": 900,
             "error_count": 1, "error_rate": 0.25, "error": null},
            {"provider": "anthropic", "model": "claude-3-haiku", "available": false,
             "error": "missing API key", "total_tokens": 0, "total_cost": 3.5,
             "request_count": 0, "error_count": 0, "error_rate": 0},
            {"provider": "google", "model": "gemini-pro", "available": true,
             "request_count": 2, "total_cost": 0.0075}
        ],
        "routing_rules": {"code": ["openai"]}
    }"#;

    #[test]
    fn test_parse_roster() {
        let snapshot: ProvidersSnapshot = serde_json::from_str(BODY).unwrap();
        assert_eq!(snapshot.providers, vec!["openai", "google"]);
        assert_eq!(snapshot.stats.len(), 3);

        let anthropic = snapshot.stats_for("anthropic").unwrap();
        assert!(!anthropic.available);
        assert_eq!(anthropic.error.as_deref(), Some("missing API key"));

        let google = snapshot.stats_for("google").unwrap();
        assert_eq!(google.total_tokens, 0);
        assert_eq!(google.error_rate, 0.0);
        assert!(snapshot.routing_rules.is_some());
    }

    #[test]
    fn test_totals_ignore_unavailable_providers() {
        let snapshot: ProvidersSnapshot = serde_json::from_str(BODY).unwrap();
        assert_eq!(snapshot.available_count(), 2);
        assert!((snapshot.total_cost() - 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_empty_body() {
        let snapshot: ProvidersSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.available_count(), 0);
        assert_eq!(snapshot.total_cost(), 0.0);
        assert!(snapshot.stats_for("openai").is_none());
    }
}
