//! RouteChat CLI application
//!
//! Chat with a multi-provider LLM routing service from the terminal.
//!
//! # Modes
//!
//! ## One-shot
//! `routechat "<query>"` streams a single answer to stdout and exits. The
//! exit status is non-zero when the session fails.
//!
//! ## Interactive (default)
//! `routechat` with no query starts a prompt loop, one session per line.
//! Ctrl+C cancels an answer in progress and exits at the prompt.
//!
//! ## Utility commands
//! `providers`, `health`, `server-config` and `config` inspect the service
//! and the local configuration. See `routechat --help`.

#![allow(clippy::collapsible_if)]
#![allow(clippy::field_reassign_with_default)]

mod args;
mod commands;
mod console;
mod logging;
mod printer;
mod router;
mod signal_handler;

use clap::Parser;
use routechat_core::error::UnifiedError;
use std::process::ExitCode;

pub use args::{Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match router::route(cli).await {
        Ok(code) => code,
        Err(e) => {
            let console = crate::console::CliConsole::new(false);
            console.error(&e.to_string());
            if let Some(hint) = e.context() {
                console.warn(hint);
            }
            tracing::debug!(code = e.error_code(), "command failed");
            ExitCode::FAILURE
        }
    }
}
