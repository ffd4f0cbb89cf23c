//! UnifiedError trait implementation for RouteChatError

use super::types::{RouteChatError, UnifiedError};

impl UnifiedError for RouteChatError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "ROUTECHAT_CONFIG",
            Self::Http { .. } => "ROUTECHAT_HTTP",
            Self::Json { .. } => "ROUTECHAT_JSON",
            Self::Io { .. } => "ROUTECHAT_IO",
            Self::Stream { .. } => "ROUTECHAT_STREAM",
            Self::InvalidInput { .. } => "ROUTECHAT_INVALID_INPUT",
            Self::SessionInFlight => "ROUTECHAT_SESSION_IN_FLIGHT",
            Self::Cancelled => "ROUTECHAT_CANCELLED",
            Self::Timeout { .. } => "ROUTECHAT_TIMEOUT",
            Self::Other { .. } => "ROUTECHAT_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::Http { message, .. } => message,
            Self::Json { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Stream { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
            Self::SessionInFlight => "A query is already in progress",
            Self::Cancelled => "Request was cancelled",
            Self::Timeout { .. } => "Timed out waiting for the routing service",
            Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Http { context, .. } => context.as_deref(),
            Self::Json { context, .. } => context.as_deref(),
            Self::Io { context, .. } => context.as_deref(),
            Self::Stream { context, .. } => context.as_deref(),
            Self::InvalidInput { context, .. } => context.as_deref(),
            Self::SessionInFlight | Self::Cancelled => None,
            Self::Timeout { context, .. } => context.as_deref(),
            Self::Other { context, .. } => context.as_deref(),
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status_code, .. } => {
                status_code.is_none_or(|code| code >= 500 || code == 429)
            }
            Self::Stream { .. } | Self::Timeout { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RouteChatError::config("x").error_code(), "ROUTECHAT_CONFIG");
        assert_eq!(
            RouteChatError::SessionInFlight.error_code(),
            "ROUTECHAT_SESSION_IN_FLIGHT"
        );
        assert_eq!(RouteChatError::Cancelled.error_code(), "ROUTECHAT_CANCELLED");
    }

    #[test]
    fn test_context_is_attached() {
        let err = RouteChatError::stream("connection reset").with_context("reading chunk 3");
        assert_eq!(err.message(), "connection reset");
        assert_eq!(err.context(), Some("reading chunk 3"));
    }

    #[test]
    fn test_result_context_prefix() {
        use crate::error::ResultExt;
        let result: Result<(), &str> = Err("worker panicked");
        let err = result.context("prompt task failed").unwrap_err();
        assert_eq!(err.error_code(), "ROUTECHAT_OTHER");
        assert_eq!(err.message(), "prompt task failed: worker panicked");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(RouteChatError::http("refused").is_retryable());
        assert!(RouteChatError::http_with_status("bad gateway", 502, "http://x").is_retryable());
        assert!(!RouteChatError::http_with_status("bad request", 400, "http://x").is_retryable());
        assert!(RouteChatError::timeout(5).is_retryable());
        assert!(!RouteChatError::invalid_input_field("empty", "query").is_retryable());
    }
}
