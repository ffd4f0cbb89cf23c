//! Error types for RouteChat
//!
//! Every fallible operation in the client returns [`RouteChatResult`]. Errors
//! implement [`UnifiedError`], which exposes a stable error code, the
//! human-readable message and optional context.
//!
//! Frame-level stream problems are deliberately *not* represented here: a
//! malformed frame is a skip, not an error (see [`crate::stream::SkipReason`]).

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{ResultExt, RouteChatError, RouteChatResult, UnifiedError};
