//! Configuration management commands

use crate::console::CliConsole;
use colored::*;
use routechat_core::config::{
    ClientConfig, ConfigOverrides, DEFAULT_CONFIG_FILE, load_config, resolve_config_path,
    save_to_file,
};
use routechat_core::error::{RouteChatError, RouteChatResult};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Show the effective configuration and where it came from
pub fn show(config_file: Option<&Path>, overrides: &ConfigOverrides) -> RouteChatResult<ExitCode> {
    let console = CliConsole::new(true);
    console.print_header("Configuration");

    let path = resolve_config_path(config_file);
    if path.exists() {
        console.success(&format!("Loaded configuration from: {}", path.display()));
    } else {
        console.warn(&format!("Configuration file not found: {}", path.display()));
        console.info("Using default configuration");
    }

    let config = load_config(config_file, overrides)?;
    for line in describe(&config) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Load and validate the configuration file
pub fn validate(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> RouteChatResult<ExitCode> {
    let console = CliConsole::new(true);
    console.print_header("Configuration Validation");

    let path = resolve_config_path(config_file);
    if !path.exists() {
        return Err(RouteChatError::config(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }
    console.info(&format!("Validating configuration file: {}", path.display()));

    match load_config(Some(&path), overrides) {
        Ok(config) => {
            console.success("Configuration is valid");
            console.print_separator();
            console.info(&format!("Service: {}", config.server.base_url));
            console.info(&format!(
                "Default provider: {}",
                config.default_provider.as_deref().unwrap_or("auto")
            ));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            console.error(&format!("Configuration validation failed: {e}"));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Write a default configuration file
pub fn init(config_file: Option<&Path>, force: bool) -> RouteChatResult<ExitCode> {
    let console = CliConsole::new(true);
    console.print_header("Configuration Initialization");

    let path = write_default(config_file, force)?;
    console.success(&format!("Created configuration file: {}", path.display()));
    console.info("Edit server.base_url to point at your routing service");
    Ok(ExitCode::SUCCESS)
}

fn write_default(config_file: Option<&Path>, force: bool) -> RouteChatResult<PathBuf> {
    let path = config_file.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
    if path.exists() && !force {
        return Err(RouteChatError::config_with_context(
            format!("Configuration file already exists: {}", path.display()),
            "Use --force to overwrite",
        ));
    }

    save_to_file(&ClientConfig::default(), &path)?;
    Ok(path)
}

fn describe(config: &ClientConfig) -> Vec<String> {
    let mut lines = vec![
        format!("Service: {}", config.server.base_url.cyan()),
        format!(
            "Default provider: {}",
            config
                .default_provider
                .as_deref()
                .unwrap_or("auto (service routing)")
                .green()
        ),
        format!(
            "Timeouts: connect {}s, request {}s, stream idle {}s",
            config.timeouts.connect_secs,
            config.timeouts.request_secs,
            config.timeouts.stream_idle_secs
        ),
        format!(
            "Logging: {} ({})",
            config.logging.level, config.logging.format
        ),
    ];

    let mut headers: Vec<_> = config.server.headers.keys().collect();
    headers.sort();
    for name in headers {
        lines.push(format!("  Header: {name}"));
    }
    lines
}
