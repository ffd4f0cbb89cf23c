//! Session state and the notifications derived from it

use crate::stream::RoutingInfo;
use serde::Serialize;
use serde_json::Value;

/// Lifecycle phase of one query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No event processed yet
    #[default]
    Idle,
    /// At least one event processed, no terminal event yet
    Streaming,
    /// A `complete` event arrived
    Completed,
    /// A terminal error arrived (or was synthesized)
    Failed,
}

impl SessionPhase {
    /// Completed and Failed accept no further changes
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Everything known about the answer being streamed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Concatenated content; replaced only by a terminal error message
    pub accumulated_text: String,
    pub selected_provider: Option<String>,
    pub selected_model: Option<String>,
    /// Last routing decision received
    pub routing_info: Option<RoutingInfo>,
    /// Provider currently being attempted, until it starts answering
    pub attempting_provider: Option<String>,
}

/// Text and attribution to show for the assistant message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageUpdate {
    pub text: String,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub kind: UpdateKind,
}

/// What a [`MessageUpdate`]'s text represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Status text such as "Trying openai..." that the next content replaces
    Attempt,
    /// The answer accumulated so far
    Content,
    /// Terminal error text that replaces the answer
    Error,
}

/// How a session ended
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The service sent `complete`; the payload is passed through untouched
    Completed { diagnostics: Value },
    /// A terminal error, from the service or synthesized by the client
    Failed { error: String },
    /// The caller cancelled the session
    Cancelled,
}

impl SessionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// State-change notification emitted while folding events
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    RoutingUpdate(RoutingInfo),
    MessageUpdate(MessageUpdate),
    SessionEnd(SessionOutcome),
}
