//! `routechat server-config`

use super::AppContext;
use routechat_core::error::RouteChatResult;
use std::process::ExitCode;

/// Print the service's provider list, warnings and routing rules
pub async fn show(ctx: &AppContext) -> RouteChatResult<ExitCode> {
    let config = ctx.controller.service_config().await?;

    ctx.console.print_header("Service Configuration");
    if config.available_providers.is_empty() {
        ctx.console.warn("No providers available on the service");
    } else {
        println!("Available providers: {}", config.available_providers.join(", "));
    }

    for warning in &config.warnings {
        ctx.console.warn(warning);
    }

    if !config.routing_rules.is_null() {
        ctx.console.print_header("Routing Rules");
        ctx.console.print_json(&config.routing_rules);
    }

    Ok(ExitCode::SUCCESS)
}
