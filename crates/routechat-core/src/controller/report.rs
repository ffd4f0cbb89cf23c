use crate::session::{Message, SessionOutcome, SessionState};

/// Result of one finished session
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    /// Final state of the response state machine
    pub state: SessionState,
    /// The assistant message as last rendered
    pub message: Message,
}

impl SessionReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// Text the user ends up seeing: the answer or `Error: ...`
    pub fn text(&self) -> &str {
        &self.state.accumulated_text
    }
}
