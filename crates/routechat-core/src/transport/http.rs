//! reqwest-backed transport

use super::{ByteStream, QueryRequest, Transport};
use crate::config::{ClientConfig, ServerConfig};
use crate::error::{RouteChatError, RouteChatResult};
use crate::providers::{HealthReport, ProvidersSnapshot, ServiceConfig};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to the routing service over HTTP
///
/// The client carries only a connect timeout. A whole-request timeout is set
/// per call on the JSON endpoints; the query stream is bounded by the
/// session's idle timeout instead.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    server: ServerConfig,
    request_timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> RouteChatResult<Self> {
        let mut client_builder = Client::builder().connect_timeout(config.timeouts.connect_timeout());

        let mut headers = HeaderMap::new();
        for (key, value) in &config.server.headers {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(val)) => {
                    headers.insert(name, val);
                }
                _ => warn!(header = %key, "ignoring invalid header from configuration"),
            }
        }
        if !headers.is_empty() {
            client_builder = client_builder.default_headers(headers);
        }

        let client = client_builder.build().map_err(|e| {
            RouteChatError::http(format!("Failed to create HTTP client: {}", e))
        })?;

        debug!(
            "Created HTTP transport for '{}' with timeouts: connect={}s, request={}s",
            config.server.base_url, config.timeouts.connect_secs, config.timeouts.request_secs
        );

        Ok(Self {
            client,
            server: config.server.clone(),
            request_timeout: config.timeouts.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.server.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> RouteChatResult<T> {
        let url = self.server.endpoint(path);
        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| RouteChatError::from(e).with_context(format!("GET {}", url)))?;

        let response = check_status(response, &url).await?;
        response.json::<T>().await.map_err(|e| {
            RouteChatError::json(format!("Invalid response body: {}", e))
                .with_context(format!("GET {}", url))
        })
    }
}

/// Turn a non-success response into an error carrying the service's message
async fn check_status(response: Response, url: &str) -> RouteChatResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RouteChatError::http_with_status(
        error_message(status.as_u16(), &body),
        status.as_u16(),
        url,
    ))
}

/// The service reports failures as `{"error": "..."}`
fn error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        format!("service returned status {}", status)
    } else {
        format!("service returned status {}: {}", status, detail)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open_query(&self, request: &QueryRequest) -> RouteChatResult<ByteStream> {
        let url = self.server.endpoint("query");
        debug!(provider = ?request.provider, "opening query stream");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| RouteChatError::from(e).with_context(format!("POST {}", url)))?;

        let response = check_status(response, &url).await?;

        let stream = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| RouteChatError::stream(format!("Failed to read response body: {}", e)))
        });

        Ok(Box::pin(stream))
    }

    async fn fetch_providers(&self) -> RouteChatResult<ProvidersSnapshot> {
        self.get_json("providers").await
    }

    async fn fetch_health(&self) -> RouteChatResult<HealthReport> {
        self.get_json("health").await
    }

    async fn fetch_service_config(&self) -> RouteChatResult<ServiceConfig> {
        self.get_json("config").await
    }
}
