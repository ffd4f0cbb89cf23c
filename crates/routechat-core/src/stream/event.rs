//! Typed events carried by the routing service's response stream

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// One event decoded from a `data: <json>` frame
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    /// The service's routing decision for this query
    Routing(RoutingInfo),
    /// A provider is being attempted or has started answering
    Provider(ProviderUpdate),
    /// Incremental answer text to append
    Content(String),
    /// A provider failed; terminal unless a fallback is being attempted
    Error(ProviderFailure),
    /// End of the stream; the payload is diagnostic only
    Complete(Value),
}

impl RouterEvent {
    /// Wire name of the event's `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Routing(_) => "routing",
            Self::Provider(_) => "provider",
            Self::Content(_) => "content",
            Self::Error(_) => "error",
            Self::Complete(_) => "complete",
        }
    }

    /// Whether this event ends the session
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Complete(_) => true,
            Self::Error(failure) => failure.is_terminal(),
            _ => false,
        }
    }

    /// Build a terminal error event with the given message
    pub fn terminal_error(message: impl Into<String>) -> Self {
        Self::Error(ProviderFailure {
            error: message.into(),
            attempting_fallback: Some(false),
            provider: None,
            attempted_providers: Vec::new(),
        })
    }

    /// Encode the event as one wire frame, including the blank separator line
    pub fn to_frame(&self) -> String {
        let data = match self {
            Self::Routing(info) => serde_json::to_value(info).unwrap_or(Value::Null),
            Self::Provider(update) => serde_json::to_value(update).unwrap_or(Value::Null),
            Self::Content(text) => Value::String(text.clone()),
            Self::Error(failure) => serde_json::to_value(failure).unwrap_or(Value::Null),
            Self::Complete(payload) => payload.clone(),
        };
        format!("data: {}\n\n", json!({ "type": self.kind(), "data": data }))
    }
}

/// Routing decision reported at the start of a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingInfo {
    /// Selected provider, `None` when no provider is available
    pub provider: Option<String>,
    pub model: Option<String>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub query_metadata: QueryMetadata,
    /// Providers in the order the service will try them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_order: Vec<String>,
}

/// The service's classification of the query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryMetadata {
    #[serde(default)]
    pub query_type: String,
    #[serde(default)]
    pub complexity: String,
    /// Additional analyzer output (token estimates, code detection, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Provider attempt status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Attempting,
    Success,
}

/// Payload of a `provider` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderUpdate {
    pub status: ProviderStatus,
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Payload of an `error` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub error: String,
    /// `Some(true)` when the service moves on to the next provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempting_fallback: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempted_providers: Vec<String>,
}

impl ProviderFailure {
    /// A failure is terminal unless the service announced a fallback attempt
    pub fn is_terminal(&self) -> bool {
        self.attempting_fallback != Some(true)
    }
}
