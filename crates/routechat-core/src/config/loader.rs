//! Layered configuration loading
//!
//! Sources are applied in order: built-in defaults, the configuration file,
//! `ROUTECHAT_*` environment variables, then command line overrides.

use super::config::ClientConfig;
use super::env_loader::{apply_env_overrides, apply_overrides_from};
use super::file_loader::load_from_file;
use crate::error::RouteChatResult;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "routechat.json";

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub provider: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(provider) = &self.provider {
            config.default_provider = Some(provider.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

/// Per-user configuration file, e.g. `~/.config/routechat/config.json`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("routechat").join("config.json"))
}

/// Pick the file to read when none was named explicitly
///
/// Prefers `routechat.json` in the working directory, then the per-user
/// file. Falls back to `routechat.json` even when it does not exist.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }

    match user_config_path() {
        Some(user) if user.exists() => user,
        _ => local,
    }
}

/// Load configuration from every source and validate the result
pub fn load_config(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> RouteChatResult<ClientConfig> {
    let path = resolve_config_path(config_file);
    tracing::debug!(path = %path.display(), "loading configuration");

    let mut config = load_from_file(&path)?;
    apply_env_overrides(&mut config)?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Same as [`load_config`] with an injected environment, for tests
pub fn load_config_with_env<F>(
    config_file: &Path,
    overrides: &ConfigOverrides,
    env: F,
) -> RouteChatResult<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = load_from_file(config_file)?;
    apply_overrides_from(&mut config, env)?;
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}
