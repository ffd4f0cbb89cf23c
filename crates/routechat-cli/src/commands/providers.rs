//! `routechat providers`

use super::AppContext;
use crate::console::format;
use colored::*;
use routechat_core::error::RouteChatResult;
use routechat_core::{ProviderStats, ProvidersSnapshot};
use std::process::ExitCode;

/// Fetch and print the provider roster with usage statistics
pub async fn show(ctx: &AppContext) -> RouteChatResult<ExitCode> {
    let spinner = ctx.console.spinner("Fetching providers...");
    let result = ctx.controller.load_providers().await;
    spinner.finish_and_clear();
    let snapshot = result?;

    ctx.console.print_header("Providers");
    if snapshot.stats.is_empty() {
        ctx.console.warn("The service reported no providers");
        return Ok(ExitCode::SUCCESS);
    }

    ctx.console.print_table_header(&[
        "Provider", "Model", "Status", "Requests", "Tokens", "Cost", "Errors",
    ]);
    for stats in &snapshot.stats {
        ctx.console.print_table_row(&row(stats));
    }

    ctx.console.print_separator();
    println!("{}", summary(&snapshot));

    for stats in snapshot.stats.iter().filter(|s| !s.available) {
        if let Some(reason) = &stats.error {
            ctx.console.info(&format!("{}: {}", stats.provider, reason));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn row(stats: &ProviderStats) -> Vec<String> {
    vec![
        stats.provider.clone(),
        stats.model.clone().unwrap_or_else(|| "-".to_string()),
        status(stats.available),
        format::number(stats.request_count),
        format::number(stats.total_tokens),
        format::cost(stats.total_cost),
        format!(
            "{} ({})",
            format::number(stats.error_count),
            format::percent(stats.error_rate)
        ),
    ]
}

fn status(available: bool) -> String {
    if available {
        "available".to_string()
    } else {
        "unavailable".to_string()
    }
}

fn summary(snapshot: &ProvidersSnapshot) -> String {
    format!(
        "{}/{} providers available, total cost {}",
        snapshot.available_count().to_string().bold(),
        snapshot.stats.len(),
        format::cost(snapshot.total_cost())
    )
}
