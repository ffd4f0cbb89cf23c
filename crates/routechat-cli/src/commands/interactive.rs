//! Interactive chat loop

use super::AppContext;
use super::ask::{stream_answer, summary};
use crate::console::format;
use colored::*;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;
use routechat_core::error::{ResultExt, RouteChatResult};
use routechat_core::Role;
use std::process::ExitCode;

/// In-loop commands
#[derive(Debug, PartialEq, Eq)]
enum LoopCommand<'a> {
    Quit,
    Help,
    Providers,
    History,
    Provider(Option<&'a str>),
    Ask(&'a str),
    Skip,
}

fn parse_input(input: &str) -> LoopCommand<'_> {
    let input = input.trim();
    let Some(command) = input.strip_prefix('/') else {
        return if input.is_empty() {
            LoopCommand::Skip
        } else {
            LoopCommand::Ask(input)
        };
    };

    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("quit" | "exit" | "q") => LoopCommand::Quit,
        Some("help" | "h") => LoopCommand::Help,
        Some("providers") => LoopCommand::Providers,
        Some("history") => LoopCommand::History,
        Some("provider") => LoopCommand::Provider(parts.next().filter(|p| *p != "auto")),
        _ => LoopCommand::Help,
    }
}

/// Read queries until `/quit` or end of input
pub async fn execute(ctx: &AppContext, provider: Option<&str>) -> RouteChatResult<ExitCode> {
    let mut preferred = provider.map(str::to_string);

    ctx.console.print_header("RouteChat");
    println!(
        "Connected to {}. Type {} for commands.",
        ctx.config.server.base_url.cyan(),
        "/help".bold()
    );

    loop {
        let Some(line) = read_line().await? else {
            break;
        };

        match parse_input(&line) {
            LoopCommand::Quit => break,
            LoopCommand::Skip => continue,
            LoopCommand::Help => print_help(),
            LoopCommand::Providers => {
                if let Err(e) = super::providers::show(ctx).await {
                    ctx.console.error(&e.to_string());
                }
            }
            LoopCommand::History => print_history(ctx),
            LoopCommand::Provider(choice) => {
                preferred = choice.map(str::to_string);
                ctx.console.success(&format!(
                    "Preferred provider: {}",
                    preferred.as_deref().unwrap_or("auto")
                ));
            }
            LoopCommand::Ask(query) => {
                match stream_answer(ctx, query, preferred.as_deref()).await {
                    Ok(report) if report.is_success() => {
                        println!("{}", summary(&report).dimmed());
                    }
                    Ok(_) => {}
                    Err(e) => ctx.console.error(&e.to_string()),
                }
            }
        }
    }

    println!("Goodbye!");
    Ok(ExitCode::SUCCESS)
}

/// Prompt on a blocking thread; `None` once input is closed
async fn read_line() -> RouteChatResult<Option<String>> {
    let result = tokio::task::spawn_blocking(|| {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
    })
    .await
    .context("prompt task failed")?;

    match result {
        Ok(line) => Ok(Some(line)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(dialoguer::Error::IO(e)) => Err(e.into()),
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /providers          provider roster and usage");
    println!("  /provider <name>    prefer a provider (/provider auto to reset)");
    println!("  /history            messages exchanged so far");
    println!("  /quit               leave");
    println!("Anything else is sent as a query. Ctrl+C cancels an answer in progress.");
}

fn print_history(ctx: &AppContext) {
    for message in ctx.controller.transcript() {
        let who = match message.role {
            Role::User => "you".bold().to_string(),
            Role::Assistant => format::attribution(message.provider.as_deref(), message.model.as_deref()),
        };
        println!(
            "{} {}: {}",
            message.timestamp.format("%H:%M:%S").to_string().dimmed(),
            who,
            message.text
        );
    }
}
