//! Default timeout values
//!
//! All of these can be overridden through [`super::TimeoutConfig`].

/// Connection establishment (10 seconds)
pub const CONNECT_SECS: u64 = 10;

/// Non-streaming JSON requests such as `/providers` (30 seconds)
pub const REQUEST_SECS: u64 = 30;

/// Silence between two chunks of a streamed answer (2 minutes)
///
/// Providers can take a while before the first token, and the service only
/// emits frames when something happens.
pub const STREAM_IDLE_SECS: u64 = 120;
