//! Ctrl+C handling
//!
//! While an answer is streaming, SIGINT cancels the session; at the prompt it
//! exits the application.

use crate::commands::ask::CANCELLED_EXIT;
use futures::stream::StreamExt;
use parking_lot::Mutex;
use routechat_core::SessionController;
use signal_hook::consts::SIGINT;
use signal_hook_tokio::Signals;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

/// Where the user is when Ctrl+C arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Sitting at the prompt
    WaitingForInput,
    /// An answer is streaming
    Streaming,
}

/// What a SIGINT should do in a given state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    Exit,
    CancelSession,
}

fn reaction(state: AppState) -> Reaction {
    match state {
        AppState::WaitingForInput => Reaction::Exit,
        AppState::Streaming => Reaction::CancelSession,
    }
}

/// Background SIGINT listener
pub struct SignalHandler {
    task_handle: Option<JoinHandle<()>>,
    app_state: Arc<Mutex<AppState>>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self {
            task_handle: None,
            app_state: Arc::new(Mutex::new(AppState::WaitingForInput)),
        }
    }

    /// Start listening for SIGINT; cancellations go to `controller`
    pub fn start(&mut self, controller: Arc<SessionController>) -> std::io::Result<()> {
        if self.task_handle.is_some() {
            return Ok(());
        }

        let mut signals = Signals::new([SIGINT])?;
        let app_state = Arc::clone(&self.app_state);

        let handle = tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                if signal != SIGINT {
                    continue;
                }
                let state = *app_state.lock();
                match reaction(state) {
                    Reaction::Exit => {
                        eprintln!("\nGoodbye!");
                        std::process::exit(i32::from(CANCELLED_EXIT));
                    }
                    Reaction::CancelSession => {
                        if controller.cancel() {
                            eprintln!("\n🛑 Cancelling the current answer... (Ctrl+C)");
                        }
                    }
                }
            }
        });

        self.task_handle = Some(handle);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.task_handle.is_some()
    }

    pub fn set_app_state(&self, state: AppState) {
        *self.app_state.lock() = state;
    }

    pub fn app_state(&self) -> AppState {
        *self.app_state.lock()
    }
}

impl Default for SignalHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

static GLOBAL_SIGNAL_HANDLER: OnceLock<Mutex<SignalHandler>> = OnceLock::new();

/// Process-wide handler, created on first use
pub fn global_signal_handler() -> &'static Mutex<SignalHandler> {
    GLOBAL_SIGNAL_HANDLER.get_or_init(|| Mutex::new(SignalHandler::new()))
}

/// Install the process-wide SIGINT listener
pub fn start_global_signal_handling(controller: Arc<SessionController>) -> std::io::Result<()> {
    global_signal_handler().lock().start(controller)
}

/// Tell the process-wide handler whether an answer is streaming
pub fn set_global_app_state(state: AppState) {
    global_signal_handler().lock().set_app_state(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_by_state() {
        assert_eq!(reaction(AppState::WaitingForInput), Reaction::Exit);
        assert_eq!(reaction(AppState::Streaming), Reaction::CancelSession);
    }

    #[test]
    fn test_state_updates() {
        let handler = SignalHandler::new();
        assert!(!handler.is_active());
        assert_eq!(handler.app_state(), AppState::WaitingForInput);

        handler.set_app_state(AppState::Streaming);
        assert_eq!(handler.app_state(), AppState::Streaming);
    }
}
