//! Chat transcript entries

use super::state::MessageUpdate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One side of an exchange
///
/// The assistant message is created empty when a query is submitted and then
/// updated in place; it keeps its id for its whole life.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            text: text.into(),
            provider: None,
            model: None,
            timestamp: Utc::now(),
        }
    }

    /// Create the empty assistant message that a response streams into
    pub fn assistant_placeholder() -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            text: String::new(),
            provider: None,
            model: None,
            timestamp: Utc::now(),
        }
    }

    /// Replace the displayed content with a newer snapshot
    pub fn apply_update(&mut self, update: &MessageUpdate) {
        self.text.clone_from(&update.text);
        self.provider.clone_from(&update.provider);
        self.model.clone_from(&update.model);
        self.timestamp = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::UpdateKind;

    #[test]
    fn test_update_keeps_identity() {
        let mut message = Message::assistant_placeholder();
        let id = message.id;

        message.apply_update(&MessageUpdate {
            text: "Trying openai...".to_string(),
            provider: Some("openai".to_string()),
            model: None,
            kind: UpdateKind::Attempt,
        });
        message.apply_update(&MessageUpdate {
            text: "Error: boom".to_string(),
            provider: None,
            model: None,
            kind: UpdateKind::Error,
        });

        assert_eq!(message.id, id);
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.text, "Error: boom");
        assert_eq!(message.provider, None);
    }

    #[test]
    fn test_user_message() {
        let message = Message::user("hi");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.text, "hi");
    }
}
