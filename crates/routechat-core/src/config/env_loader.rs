//! Environment variable configuration overrides

use super::config::ClientConfig;
use crate::error::{RouteChatError, RouteChatResult};
use std::env;

pub const ENV_BASE_URL: &str = "ROUTECHAT_BASE_URL";
pub const ENV_PROVIDER: &str = "ROUTECHAT_PROVIDER";
pub const ENV_LOG_LEVEL: &str = "ROUTECHAT_LOG_LEVEL";
pub const ENV_STREAM_IDLE_SECS: &str = "ROUTECHAT_STREAM_IDLE_SECS";

/// Apply `ROUTECHAT_*` variables from the process environment
pub fn apply_env_overrides(config: &mut ClientConfig) -> RouteChatResult<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides from an arbitrary variable lookup
///
/// An empty `ROUTECHAT_PROVIDER` switches back to automatic routing.
pub fn apply_overrides_from<F>(config: &mut ClientConfig, lookup: F) -> RouteChatResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_BASE_URL) {
        config.server.base_url = base_url;
    }

    if let Some(provider) = lookup(ENV_PROVIDER) {
        let provider = provider.trim();
        config.default_provider = (!provider.is_empty()).then(|| provider.to_string());
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }

    if let Some(idle) = lookup(ENV_STREAM_IDLE_SECS) {
        config.timeouts.stream_idle_secs = idle.trim().parse().map_err(|_| {
            RouteChatError::config(format!("Invalid {} value: '{}'", ENV_STREAM_IDLE_SECS, idle))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_no_variables_changes_nothing() {
        let mut config = ClientConfig::default();
        apply_overrides_from(&mut config, lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = ClientConfig::default();
        apply_overrides_from(
            &mut config,
            lookup(&[
                (ENV_BASE_URL, "http://gateway/api"),
                (ENV_PROVIDER, "google"),
                (ENV_LOG_LEVEL, "trace"),
                (ENV_STREAM_IDLE_SECS, "15"),
            ]),
        )
        .unwrap();

        assert_eq!(config.server.base_url, "http://gateway/api");
        assert_eq!(config.default_provider.as_deref(), Some("google"));
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.timeouts.stream_idle_secs, 15);
    }

    #[test]
    fn test_empty_provider_means_auto() {
        let mut config = ClientConfig {
            default_provider: Some("openai".to_string()),
            ..Default::default()
        };
        apply_overrides_from(&mut config, lookup(&[(ENV_PROVIDER, "")])).unwrap();
        assert_eq!(config.default_provider, None);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let mut config = ClientConfig::default();
        let err = apply_overrides_from(&mut config, lookup(&[(ENV_STREAM_IDLE_SECS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_STREAM_IDLE_SECS));
    }
}
