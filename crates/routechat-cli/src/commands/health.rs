//! `routechat health`

use super::AppContext;
use colored::*;
use routechat_core::HealthReport;
use routechat_core::error::RouteChatResult;
use std::process::ExitCode;

/// Print per-provider health; fails unless every provider is up
pub async fn show(ctx: &AppContext) -> RouteChatResult<ExitCode> {
    let report = ctx.controller.health().await?;

    ctx.console.print_header("Provider Health");
    if report.providers.is_empty() {
        ctx.console.warn("The service reported no providers");
    }
    for line in lines(&report) {
        println!("{line}");
    }

    if report.all_healthy() {
        ctx.console.success("All providers healthy");
        Ok(ExitCode::SUCCESS)
    } else {
        ctx.console.info(&format!(
            "Healthy: {}",
            report.healthy().collect::<Vec<_>>().join(", ")
        ));
        Ok(ExitCode::FAILURE)
    }
}

fn lines(report: &HealthReport) -> Vec<String> {
    report
        .providers
        .iter()
        .map(|(name, ok)| {
            if *ok {
                format!("{} {}", "✓".green().bold(), name)
            } else {
                format!("{} {}", "✗".red().bold(), name)
            }
        })
        .collect()
}
