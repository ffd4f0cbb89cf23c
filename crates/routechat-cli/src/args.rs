//! CLI argument definitions using clap
//!
//! - routechat                  # Interactive mode (default)
//! - routechat "query"          # One-shot answer
//! - routechat providers        # Utility commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "routechat")]
#[command(about = "RouteChat - chat client for a multi-provider LLM routing service")]
#[command(
    long_about = r#"RouteChat - chat client for a multi-provider LLM routing service

USAGE:
  routechat                          # Start interactive mode
  routechat "your question"          # Stream one answer and exit
  routechat -p openai "question"     # Ask a specific provider

UTILITY COMMANDS:
  routechat providers                # Provider roster and usage
  routechat health                   # Provider health
  routechat server-config            # Service-side configuration
  routechat config init              # Create a config file

For detailed help: routechat --help"#
)]
#[command(version)]
pub struct Cli {
    /// Query to answer (omit for the interactive prompt)
    pub query: Option<String>,

    /// Preferred provider; the service routes automatically when omitted
    #[arg(long, short)]
    pub provider: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Routing service API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output and debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Print the routing decision before each answer
    #[arg(long, global = true)]
    pub show_routing: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the provider roster with usage statistics
    Providers,

    /// Check the health of each provider
    Health,

    /// Show the routing service's own configuration
    ServerConfig,

    /// Manage the local configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Check the configuration for errors
    Validate,

    /// Create a configuration file with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
