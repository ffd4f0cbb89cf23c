//! CLI commands

pub mod ask;
pub mod config;
pub mod health;
pub mod interactive;
pub mod providers;
pub mod server_config;

use crate::console::CliConsole;
use routechat_core::{ClientConfig, SessionController};
use std::sync::Arc;

/// Everything a service-facing command needs
pub struct AppContext {
    pub console: CliConsole,
    pub controller: Arc<SessionController>,
    pub config: ClientConfig,
    pub show_routing: bool,
}
