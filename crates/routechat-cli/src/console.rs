//! CLI console utilities

use colored::*;
use console::Alignment;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const COLUMN_WIDTH: usize = 14;
const SEPARATOR_WIDTH: usize = 50;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose mode only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning on stderr, away from the streamed answer
    pub fn warn(&self, message: &str) {
        Self::diagnostic("⚠".yellow().bold(), message.yellow());
    }

    /// Print an error on stderr
    pub fn error(&self, message: &str) {
        Self::diagnostic("✗".red().bold(), message.red());
    }

    fn diagnostic(mark: ColoredString, message: ColoredString) {
        eprintln!("{mark} {message}");
    }

    /// Print a section title, underlined to its display width
    pub fn print_header(&self, title: &str) {
        let width = console::measure_text_width(title);
        println!("\n{}\n{}", title.bold().underline(), "=".repeat(width).dimmed());
    }

    pub fn print_separator(&self) {
        println!("{}", "─".repeat(SEPARATOR_WIDTH).dimmed());
    }

    /// Print table column titles followed by a rule
    pub fn print_table_header(&self, headers: &[&str]) {
        let line = join_cells(headers.iter().copied());
        println!("{}", line.bold());
        println!("{}", "-".repeat(console::measure_text_width(&line)).dimmed());
    }

    /// Print a table row, padding by display width
    pub fn print_table_row(&self, cells: &[String]) {
        println!("{}", join_cells(cells.iter().map(String::as_str)));
    }

    /// Print JSON in a formatted way
    pub fn print_json(&self, json: &serde_json::Value) {
        match serde_json::to_string_pretty(json) {
            Ok(formatted) => println!("{formatted}"),
            Err(_) => println!("{json}"),
        }
    }

    /// Spinner on stderr, ticking until finished or cleared
    pub fn spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells
        .map(|c| console::pad_str(c, COLUMN_WIDTH, Alignment::Left, Some("…")).into_owned())
        .collect::<Vec<_>>()
        .join(" | ")
}


/// Utility functions for console formatting
pub mod format {
    use colored::*;

    /// Format a dollar amount with cents precision for small values
    pub fn cost(amount: f64) -> String {
        format!("${:.4}", amount)
    }

    /// Format a 0..1 ratio as a percentage
    pub fn percent(ratio: f64) -> String {
        format!("{:.0}%", ratio * 100.0)
    }

    /// Format a number with commas
    pub fn number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (i, c) in s.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result.chars().rev().collect()
    }

    /// Provider/model attribution, e.g. `openai (gpt-4o)`
    pub fn attribution(provider: Option<&str>, model: Option<&str>) -> String {
        match (provider, model) {
            (Some(provider), Some(model)) => format!("{} ({})", provider.cyan(), model),
            (Some(provider), None) => provider.cyan().to_string(),
            (None, _) => "auto".dimmed().to_string(),
        }
    }

}
