//! Provider roster and service status reported by the routing service
//!
//! None of this is part of the streaming contract; the controller refreshes
//! the roster after each session so front ends can show live statistics.

mod service;
mod snapshot;

pub use service::{HealthReport, ServiceConfig};
pub use snapshot::{ProviderStats, ProvidersSnapshot};
