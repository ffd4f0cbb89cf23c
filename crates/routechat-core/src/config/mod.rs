//! Client configuration

#[allow(clippy::module_inception)]
mod config;
mod env_loader;
mod file_loader;
mod logging_config;

pub mod loader;
pub mod timeouts;

pub use config::{ClientConfig, DEFAULT_BASE_URL, ServerConfig, TimeoutConfig};
pub use env_loader::{
    ENV_BASE_URL, ENV_LOG_LEVEL, ENV_PROVIDER, ENV_STREAM_IDLE_SECS, apply_env_overrides,
};
pub use file_loader::{load_from_file, save_to_file};
pub use loader::{ConfigOverrides, DEFAULT_CONFIG_FILE, load_config, resolve_config_path, user_config_path};
pub use logging_config::LoggingConfig;
