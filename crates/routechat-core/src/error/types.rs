//! Core error types and traits for RouteChat

use thiserror::Error;

/// Result type alias for RouteChat operations
pub type RouteChatResult<T> = Result<T, RouteChatError>;

/// Unified error trait implemented by all RouteChat errors.
///
/// - error_code(): Unique code for programmatic error identification
/// - message(): Human-readable error message
/// - context(): Optional additional context
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if this error is retryable
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Extension trait for attaching context to foreign errors
pub trait ResultExt<T> {
    /// Wrap the error as [`RouteChatError::Other`], prefixed with `context`
    fn context<C: std::fmt::Display>(self, context: C) -> RouteChatResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> RouteChatResult<T> {
        self.map_err(|e| RouteChatError::other(format!("{}: {}", context, e)))
    }
}

/// Main error type for RouteChat
#[derive(Error, Debug, Clone)]
pub enum RouteChatError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// HTTP request errors (connection, status, body read)
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors outside the event stream
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// The response stream broke off or could not be read
    #[error("Stream error: {message}")]
    Stream {
        message: String,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// A query was submitted while another one is still streaming
    #[error("A query is already in progress")]
    SessionInFlight,

    /// The session was cancelled by the caller
    #[error("Request was cancelled")]
    Cancelled,

    /// No data arrived within the allowed window
    #[error("Timed out after {seconds} seconds")]
    Timeout {
        seconds: u64,
        context: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
