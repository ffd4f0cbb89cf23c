//! One-shot question

use super::AppContext;
use crate::console::format;
use crate::printer::AnswerPrinter;
use crate::signal_handler::{AppState, set_global_app_state};
use colored::*;
use routechat_core::error::RouteChatResult;
use routechat_core::{SessionOutcome, SessionReport};
use std::io;
use std::process::ExitCode;

/// Exit status after the user cancelled with Ctrl+C
pub const CANCELLED_EXIT: u8 = 130;

/// Stream one answer to stdout
pub async fn execute(
    ctx: &AppContext,
    query: &str,
    provider: Option<&str>,
) -> RouteChatResult<ExitCode> {
    let report = stream_answer(ctx, query, provider).await?;
    if report.is_success() && ctx.console.is_verbose() {
        eprintln!("{}", summary(&report).dimmed());
    }
    Ok(exit_code(&report.outcome))
}

/// Run one session, rendering it on the terminal
///
/// Shared with interactive mode. Failures are reported on stderr.
pub async fn stream_answer(
    ctx: &AppContext,
    query: &str,
    provider: Option<&str>,
) -> RouteChatResult<SessionReport> {
    let spinner = ctx.console.spinner("Routing query...");
    let mut printer = AnswerPrinter::new(io::stdout(), spinner.clone(), ctx.show_routing);

    set_global_app_state(AppState::Streaming);
    let result = ctx.controller.submit(query, provider, &mut printer).await;
    set_global_app_state(AppState::WaitingForInput);
    spinner.finish_and_clear();

    let report = result?;
    match &report.outcome {
        SessionOutcome::Completed { .. } => {}
        SessionOutcome::Failed { .. } => ctx.console.error(report.text()),
        SessionOutcome::Cancelled => ctx.console.warn("Answer cancelled"),
    }
    Ok(report)
}

/// Attribution line, e.g. `via openai (gpt-4o) in 1.20s`
pub fn summary(report: &SessionReport) -> String {
    let mut line = format!(
        "via {}",
        format::attribution(
            report.message.provider.as_deref(),
            report.message.model.as_deref()
        )
    );
    if let SessionOutcome::Completed { diagnostics } = &report.outcome {
        if let Some(elapsed) = diagnostics.get("elapsed_time").and_then(|v| v.as_f64()) {
            line.push_str(&format!(" in {:.2}s", elapsed));
        }
    }
    line
}

fn exit_code(outcome: &SessionOutcome) -> ExitCode {
    match outcome {
        SessionOutcome::Completed { .. } => ExitCode::SUCCESS,
        SessionOutcome::Failed { .. } => ExitCode::FAILURE,
        SessionOutcome::Cancelled => ExitCode::from(CANCELLED_EXIT),
    }
}
