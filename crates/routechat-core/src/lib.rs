//! RouteChat Core Library
//!
//! Client-side machinery for a multi-provider LLM routing service: decoding
//! the streamed `data: <json>` response into typed events, folding those
//! events into per-query session state, and running one query at a time
//! against the service.
//!
//! ```text
//! bytes --> FrameDecoder --> lines --> parse_line --> RouterEvent
//!       --> ResponseStateMachine --> Notification --> SessionObserver
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod providers;
pub mod session;
pub mod stream;
pub mod transport;

// Re-export commonly used types
pub use config::{ClientConfig, ConfigOverrides, load_config};
pub use controller::{SessionController, SessionReport};
pub use error::{RouteChatError, RouteChatResult};
pub use providers::{HealthReport, ProviderStats, ProvidersSnapshot, ServiceConfig};
pub use session::{
    Message, MessageUpdate, Notification, ResponseStateMachine, Role, SessionObserver,
    SessionOutcome, SessionPhase, SessionState,
};
pub use stream::{EventReader, FrameDecoder, RouterEvent, RoutingInfo};
pub use transport::{HttpTransport, QueryRequest, Transport};
