//! Response state machine
//!
//! Folds router events into [`SessionState`]:
//!
//! ```text
//! Idle --any event--> Streaming --complete--> Completed
//!                         |
//!                         +--terminal error--> Failed
//! ```
//!
//! Terminal phases ignore late or duplicate events.

use super::state::{
    MessageUpdate, Notification, SessionOutcome, SessionPhase, SessionState, UpdateKind,
};
use crate::stream::{ProviderFailure, ProviderStatus, ProviderUpdate, RouterEvent};
use tracing::{debug, warn};

/// Message used when the caller cancels a session
pub const CANCELLED_MESSAGE: &str = "request cancelled";

/// Apply one event to a session state
///
/// Pure transition: the returned notifications describe exactly what changed,
/// in the order a presenter should see them.
pub fn transition(mut state: SessionState, event: RouterEvent) -> (SessionState, Vec<Notification>) {
    let notifications = apply(&mut state, event);
    (state, notifications)
}

fn apply(state: &mut SessionState, event: RouterEvent) -> Vec<Notification> {
    if state.phase.is_terminal() {
        debug!(
            "Ignoring '{}' event after session reached {:?}",
            event.kind(),
            state.phase
        );
        return Vec::new();
    }

    // Any event leaves Idle, including a non-terminal error
    state.phase = SessionPhase::Streaming;

    match event {
        RouterEvent::Routing(info) => {
            // Last routing event wins
            state.routing_info = Some(info.clone());
            vec![Notification::RoutingUpdate(info)]
        }

        RouterEvent::Provider(update) => apply_provider(state, update),

        RouterEvent::Content(fragment) => {
            state.attempting_provider = None;
            state.accumulated_text.push_str(&fragment);
            vec![Notification::MessageUpdate(MessageUpdate {
                text: state.accumulated_text.clone(),
                provider: state.selected_provider.clone(),
                model: state.selected_model.clone(),
                kind: UpdateKind::Content,
            })]
        }

        RouterEvent::Error(failure) if !failure.is_terminal() => {
            log_fallback(&failure);
            Vec::new()
        }

        RouterEvent::Error(failure) => fail(state, &failure.error),

        RouterEvent::Complete(diagnostics) => {
            debug!("Response complete: {}", diagnostics);
            state.phase = SessionPhase::Completed;
            let mut notifications: Vec<Notification> = clear_attempt(state).into_iter().collect();
            notifications.push(Notification::SessionEnd(SessionOutcome::Completed {
                diagnostics,
            }));
            notifications
        }
    }
}

fn apply_provider(state: &mut SessionState, update: ProviderUpdate) -> Vec<Notification> {
    match update.status {
        ProviderStatus::Attempting => {
            let text = format!("Trying {}...", update.provider);
            state.attempting_provider = Some(update.provider.clone());
            vec![Notification::MessageUpdate(MessageUpdate {
                text,
                provider: Some(update.provider),
                model: update.model,
                kind: UpdateKind::Attempt,
            })]
        }
        ProviderStatus::Success => {
            state.selected_provider = Some(update.provider);
            state.selected_model = update.model;
            clear_attempt(state).into_iter().collect()
        }
    }
}

/// Replace a displayed "Trying ..." text with the real answer so far
///
/// Silent when no attempt is on display.
fn clear_attempt(state: &mut SessionState) -> Option<Notification> {
    state.attempting_provider.take()?;
    Some(Notification::MessageUpdate(MessageUpdate {
        text: state.accumulated_text.clone(),
        provider: state.selected_provider.clone(),
        model: state.selected_model.clone(),
        kind: UpdateKind::Content,
    }))
}

fn log_fallback(failure: &ProviderFailure) {
    warn!(
        "Provider {} failed ({}), service is trying a fallback",
        failure.provider.as_deref().unwrap_or("unknown"),
        failure.error
    );
}

fn fail(state: &mut SessionState, error: &str) -> Vec<Notification> {
    state.phase = SessionPhase::Failed;
    state.attempting_provider = None;
    state.accumulated_text = format!("Error: {}", error);
    vec![
        Notification::MessageUpdate(MessageUpdate {
            text: state.accumulated_text.clone(),
            provider: None,
            model: None,
            kind: UpdateKind::Error,
        }),
        Notification::SessionEnd(SessionOutcome::Failed {
            error: error.to_string(),
        }),
    ]
}

/// Owner of one session's state for the duration of a query
#[derive(Debug, Default)]
pub struct ResponseStateMachine {
    state: SessionState,
}

impl ResponseStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one event
    pub fn apply(&mut self, event: RouterEvent) -> Vec<Notification> {
        apply(&mut self.state, event)
    }

    /// Force a terminal failure with a client-side message
    ///
    /// Used when the transport fails before the service sent a terminal
    /// event. No-op once the session is already terminal.
    pub fn fail(&mut self, error: &str) -> Vec<Notification> {
        self.apply(RouterEvent::terminal_error(error))
    }

    /// Force a terminal failure caused by caller cancellation
    pub fn cancel(&mut self) -> Vec<Notification> {
        let mut notifications = self.fail(CANCELLED_MESSAGE);
        for notification in &mut notifications {
            if let Notification::SessionEnd(outcome) = notification {
                *outcome = SessionOutcome::Cancelled;
            }
        }
        notifications
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.state.phase.is_terminal()
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }
}
