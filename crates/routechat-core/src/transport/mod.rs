//! Connection to the routing service
//!
//! [`Transport`] is the seam between the session pipeline and the network:
//! [`HttpTransport`] talks to a live service, tests substitute scripted
//! byte streams.

mod http;

pub use http::HttpTransport;

use crate::error::RouteChatResult;
use crate::providers::{HealthReport, ProvidersSnapshot, ServiceConfig};
use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;
use std::pin::Pin;

/// Raw response body chunks, in arrival order
pub type ByteStream = Pin<Box<dyn Stream<Item = RouteChatResult<Vec<u8>>> + Send>>;

/// Body of `POST /query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub query: String,
    /// `None` serializes as `null` and lets the service pick
    pub provider: Option<String>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, provider: Option<String>) -> Self {
        Self {
            query: query.into(),
            provider,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit a query and return its event stream body
    ///
    /// Fails if the connection cannot be opened or the service answers with
    /// a non-success status.
    async fn open_query(&self, request: &QueryRequest) -> RouteChatResult<ByteStream>;

    async fn fetch_providers(&self) -> RouteChatResult<ProvidersSnapshot>;

    async fn fetch_health(&self) -> RouteChatResult<HealthReport>;

    async fn fetch_service_config(&self) -> RouteChatResult<ServiceConfig>;
}
