//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands::{self, AppContext};
use crate::console::CliConsole;
use crate::logging;
use crate::signal_handler;
use routechat_core::config::{ConfigOverrides, LoggingConfig, load_config};
use routechat_core::error::RouteChatResult;
use routechat_core::{HttpTransport, SessionController};
use std::process::ExitCode;
use std::sync::Arc;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> RouteChatResult<ExitCode> {
    match &cli.command {
        Some(Commands::Config { action }) => {
            logging::init(&LoggingConfig::default(), cli.verbose);
            route_config(&cli, action.clone())
        }
        Some(Commands::Providers) => commands::providers::show(&connect(&cli)?).await,
        Some(Commands::Health) => commands::health::show(&connect(&cli)?).await,
        Some(Commands::ServerConfig) => commands::server_config::show(&connect(&cli)?).await,
        None => route_chat(&cli, &connect(&cli)?).await,
    }
}

/// Load configuration, install logging and build the session controller
fn connect(cli: &Cli) -> RouteChatResult<AppContext> {
    let config = load_config(cli.config_file.as_deref(), &overrides(cli))?;
    logging::init(&config.logging, cli.verbose);

    let transport = HttpTransport::new(&config)?;
    let controller = Arc::new(SessionController::new(Arc::new(transport), &config));
    tracing::debug!(base_url = %config.server.base_url, "connected controller");

    Ok(AppContext {
        console: CliConsole::new(cli.verbose),
        controller,
        config,
        show_routing: cli.show_routing,
    })
}

/// One-shot when a query was given, interactive otherwise
async fn route_chat(cli: &Cli, ctx: &AppContext) -> RouteChatResult<ExitCode> {
    if let Err(e) = signal_handler::start_global_signal_handling(Arc::clone(&ctx.controller)) {
        tracing::warn!(error = %e, "Ctrl+C handling unavailable");
    }

    match &cli.query {
        Some(query) => commands::ask::execute(ctx, query, cli.provider.as_deref()).await,
        None => commands::interactive::execute(ctx, cli.provider.as_deref()).await,
    }
}

fn route_config(cli: &Cli, action: ConfigAction) -> RouteChatResult<ExitCode> {
    let overrides = overrides(cli);
    let config_file = cli.config_file.as_deref();
    match action {
        ConfigAction::Show => commands::config::show(config_file, &overrides),
        ConfigAction::Validate => commands::config::validate(config_file, &overrides),
        ConfigAction::Init { force } => commands::config::init(config_file, force),
    }
}

fn overrides(cli: &Cli) -> ConfigOverrides {
    ConfigOverrides {
        base_url: cli.base_url.clone(),
        provider: cli.provider.clone(),
        log_level: None,
    }
}
