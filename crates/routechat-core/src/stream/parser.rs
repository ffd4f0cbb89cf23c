//! Classification of decoded lines into router events
//!
//! Only lines starting with `data: ` carry events. Anything that cannot be
//! turned into a known event is skipped, never raised as an error, so one bad
//! frame cannot abort the rest of the stream.

use super::event::{ProviderFailure, ProviderUpdate, RouterEvent, RoutingInfo};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Marker that prefixes every event-carrying line
pub const DATA_PREFIX: &str = "data: ";

/// Outcome of parsing a single line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Event(RouterEvent),
    Skip(SkipReason),
}

/// Why a line did not produce an event
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Blank keep-alive, comment, or any line without the data marker
    NotData,
    /// The payload after the marker is not valid JSON
    MalformedJson(String),
    /// The payload has no string `type` field
    MissingType,
    /// A `type` this client does not know about
    UnknownType(String),
    /// A known `type` whose `data` has the wrong shape
    InvalidPayload { event_type: String, message: String },
}

impl SkipReason {
    /// Whether the skip points at a broken frame rather than expected noise
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::MalformedJson(_) | Self::MissingType | Self::InvalidPayload { .. }
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotData => write!(f, "not a data line"),
            Self::MalformedJson(e) => write!(f, "malformed JSON: {}", e),
            Self::MissingType => write!(f, "missing event type"),
            Self::UnknownType(t) => write!(f, "unknown event type '{}'", t),
            Self::InvalidPayload {
                event_type,
                message,
            } => write!(f, "invalid '{}' payload: {}", event_type, message),
        }
    }
}

/// Parse one line into an event or a skip
pub fn parse_line(line: &str) -> ParsedLine {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return ParsedLine::Skip(SkipReason::NotData);
    };

    match parse_payload(payload) {
        Ok(event) => ParsedLine::Event(event),
        Err(reason) => ParsedLine::Skip(reason),
    }
}

fn parse_payload(payload: &str) -> Result<RouterEvent, SkipReason> {
    let mut value: Value =
        serde_json::from_str(payload).map_err(|e| SkipReason::MalformedJson(e.to_string()))?;

    let event_type = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SkipReason::MissingType)?
        .to_string();
    let data = value
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null);

    match event_type.as_str() {
        "routing" => decode::<RoutingInfo>(&event_type, data).map(RouterEvent::Routing),
        "provider" => decode::<ProviderUpdate>(&event_type, data).map(RouterEvent::Provider),
        "content" => decode::<String>(&event_type, data).map(RouterEvent::Content),
        "error" => decode::<ProviderFailure>(&event_type, data).map(RouterEvent::Error),
        "complete" => Ok(RouterEvent::Complete(data)),
        _ => Err(SkipReason::UnknownType(event_type)),
    }
}

fn decode<T: DeserializeOwned>(event_type: &str, data: Value) -> Result<T, SkipReason> {
    serde_json::from_value(data).map_err(|e| SkipReason::InvalidPayload {
        event_type: event_type.to_string(),
        message: e.to_string(),
    })
}
