//! File-based configuration loading and saving

use super::config::ClientConfig;
use crate::error::{RouteChatError, RouteChatResult};
use std::fs;
use std::path::Path;

enum Format {
    Json,
    Toml,
    Yaml,
}

fn format_of(path: &Path) -> Format {
    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => Format::Toml,
        Some("yaml") | Some("yml") => Format::Yaml,
        _ => Format::Json,
    }
}

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if the file doesn't exist.
pub fn load_from_file(path: &Path) -> RouteChatResult<ClientConfig> {
    if !path.exists() {
        return Ok(ClientConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        RouteChatError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config = match format_of(path) {
        Format::Toml => toml::from_str(&content).map_err(|e| {
            RouteChatError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Format::Yaml => serde_yaml::from_str(&content).map_err(|e| {
            RouteChatError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        Format::Json => serde_json::from_str(&content).map_err(|e| {
            RouteChatError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

/// Write configuration to a file, in the format implied by its extension
pub fn save_to_file(config: &ClientConfig, path: &Path) -> RouteChatResult<()> {
    let content = match format_of(path) {
        Format::Toml => toml::to_string_pretty(config)?,
        Format::Yaml => serde_yaml::to_string(config)?,
        Format::Json => serde_json::to_string_pretty(config)?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| RouteChatError::io_with_path(e.to_string(), parent.display().to_string()))?;
    }

    fs::write(path, content)
        .map_err(|e| RouteChatError::io_with_path(e.to_string(), path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_from_file(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routechat.json");
        fs::write(
            &path,
            r#"{
                "server": {"base_url": "http://router:5000/api", "headers": {"X-Team": "core"}},
                "default_provider": "anthropic",
                "timeouts": {"stream_idle_secs": 45},
                "logging": {"level": "debug", "format": "json"}
            }"#,
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.server.base_url, "http://router:5000/api");
        assert_eq!(config.server.headers.get("X-Team").map(String::as_str), Some("core"));
        assert_eq!(config.default_provider.as_deref(), Some("anthropic"));
        assert_eq!(config.timeouts.stream_idle_secs, 45);
        assert_eq!(config.timeouts.connect_secs, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routechat.toml");
        fs::write(
            &path,
            "default_provider = \"google\"\n\n[server]\nbase_url = \"https://r.example/api\"\n",
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.server.base_url, "https://r.example/api");
        assert_eq!(config.default_provider.as_deref(), Some("google"));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routechat.yml");
        fs::write(&path, "timeouts:\n  connect_secs: 3\n").unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.timeouts.connect_secs, 3);
    }

    #[test]
    fn test_invalid_json_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_from_file(&path).unwrap_err();
        match err {
            RouteChatError::Config { message, context } => {
                assert!(message.contains("JSON"));
                assert!(context.unwrap().contains("broken.json"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_save_then_load_each_format() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = ClientConfig::default();
        config.default_provider = Some("openai".to_string());
        config.timeouts.request_secs = 12;

        for name in ["nested/c.json", "c.toml", "c.yaml"] {
            let path = temp_dir.path().join(name);
            save_to_file(&config, &path).unwrap();
            assert_eq!(load_from_file(&path).unwrap(), config, "format of {}", name);
        }
    }
}
