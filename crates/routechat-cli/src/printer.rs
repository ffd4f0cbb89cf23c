//! Incremental terminal rendering of a streamed answer

use colored::*;
use indicatif::ProgressBar;
use routechat_core::session::{MessageUpdate, SessionObserver, SessionOutcome, UpdateKind};
use routechat_core::stream::RoutingInfo;
use std::io::Write;

/// Writes answer text to `out` as it arrives
///
/// Each update carries the whole text so far; only the new suffix is
/// written. Transient status text ("Trying openai...") goes to the spinner.
/// A terminal error cannot unprint streamed text, so the printer only ends
/// the partial line and leaves reporting the error to the caller.
pub struct AnswerPrinter<W: Write + Send> {
    out: W,
    spinner: ProgressBar,
    show_routing: bool,
    printed: String,
}

impl<W: Write + Send> AnswerPrinter<W> {
    pub fn new(out: W, spinner: ProgressBar, show_routing: bool) -> Self {
        Self {
            out,
            spinner,
            show_routing,
            printed: String::new(),
        }
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to write answer");
        }
    }

    /// Close a partially printed line
    fn end_line(&mut self) {
        if !self.printed.is_empty() && !self.printed.ends_with('\n') {
            self.write("\n");
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> SessionObserver for AnswerPrinter<W> {
    fn on_routing_update(&mut self, info: &RoutingInfo) {
        let provider = info.provider.as_deref().unwrap_or("no provider");
        self.spinner.set_message(format!("Routing to {}...", provider));

        if self.show_routing {
            let mut summary = format!(
                "{} {} ({}; {} {})",
                "↪".blue().bold(),
                provider.cyan(),
                info.reason,
                info.query_metadata.query_type,
                info.query_metadata.complexity
            );
            if !info.fallback_order.is_empty() {
                summary.push_str(&format!(", fallback: {}", info.fallback_order.join(" → ")));
            }
            self.spinner.suspend(|| eprintln!("{}", summary.dimmed()));
        }
    }

    fn on_message_update(&mut self, update: &MessageUpdate) {
        match update.kind {
            UpdateKind::Attempt => self.spinner.set_message(update.text.clone()),
            UpdateKind::Content => {
                let Some(suffix) = update.text.strip_prefix(self.printed.as_str()) else {
                    return;
                };
                if suffix.is_empty() {
                    // Provider picked, no text yet
                    let provider = update.provider.as_deref().unwrap_or("provider");
                    self.spinner.set_message(format!("Waiting for {}...", provider));
                    return;
                }
                let suffix = suffix.to_string();
                self.spinner.finish_and_clear();
                self.write(&suffix);
                self.printed.push_str(&suffix);
            }
            UpdateKind::Error => {
                self.spinner.finish_and_clear();
                self.end_line();
            }
        }
    }

    fn on_session_end(&mut self, outcome: &SessionOutcome) {
        self.spinner.finish_and_clear();
        if outcome.is_success() {
            self.end_line();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routechat_core::session::{Notification, ResponseStateMachine};
    use routechat_core::stream::EventReader;

    fn render(body: &str) -> String {
        let mut printer = AnswerPrinter::new(Vec::new(), ProgressBar::hidden(), false);
        let mut reader = EventReader::new();
        let mut machine = ResponseStateMachine::new();

        for event in reader.feed(body.as_bytes()) {
            for notification in machine.apply(event) {
                printer.notify(&notification);
            }
        }
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_streams_only_content() {
        let output = render(concat!(
            "data: {\"type\":\"provider\",\"data\":{\"status\":\"attempting\",\"provider\":\"openai\"}}\n\n",
            "data: {\"type\":\"provider\",\"data\":{\"status\":\"success\",\"provider\":\"openai\"}}\n\n",
            "data: {\"type\":\"content\",\"data\":\"Hel\"}\n\n",
            "data: {\"type\":\"content\",\"data\":\"lo\"}\n\n",
            "data: {\"type\":\"complete\",\"data\":{}}\n\n",
        ));
        assert_eq!(output, "Hello\n");
    }

    #[test]
    fn test_empty_answer_prints_nothing() {
        let output = render(concat!(
            "data: {\"type\":\"provider\",\"data\":{\"status\":\"attempting\",\"provider\":\"openai\"}}\n\n",
            "data: {\"type\":\"provider\",\"data\":{\"status\":\"success\",\"provider\":\"openai\"}}\n\n",
            "data: {\"type\":\"complete\",\"data\":{}}\n\n",
        ));
        assert_eq!(output, "");
    }

    #[test]
    fn test_terminal_error_ends_partial_line() {
        let output = render(concat!(
            "data: {\"type\":\"content\",\"data\":\"Hel\"}\n\n",
            "data: {\"type\":\"error\",\"data\":{\"error\":\"rate limited\"}}\n\n",
        ));
        assert_eq!(output, "Hel\n");
    }

    #[test]
    fn test_error_without_content_prints_nothing() {
        let mut printer = AnswerPrinter::new(Vec::new(), ProgressBar::hidden(), true);
        let mut machine = ResponseStateMachine::new();
        for notification in machine.fail("could not reach the routing service") {
            printer.notify(&notification);
        }
        assert!(matches!(
            machine.state().phase,
            routechat_core::session::SessionPhase::Failed
        ));
        assert!(printer.into_inner().is_empty());
    }

    #[test]
    fn test_cancel_after_content() {
        let mut printer = AnswerPrinter::new(Vec::new(), ProgressBar::hidden(), false);
        let mut machine = ResponseStateMachine::new();
        let mut notifications: Vec<Notification> = machine.apply(
            routechat_core::stream::RouterEvent::Content("partial".to_string()),
        );
        notifications.extend(machine.cancel());
        for notification in &notifications {
            printer.notify(notification);
        }
        assert_eq!(String::from_utf8(printer.into_inner()).unwrap(), "partial\n");
    }
}
