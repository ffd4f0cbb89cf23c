//! Orchestration of query/response cycles
//!
//! [`SessionController`] owns the single in-flight session. It opens the
//! transport, pipes chunks through [`EventReader`] into a
//! [`ResponseStateMachine`] and forwards every notification to the caller's
//! [`SessionObserver`] in event order.

mod report;

pub use report::SessionReport;

use crate::config::ClientConfig;
use crate::error::{RouteChatError, RouteChatResult};
use crate::providers::{HealthReport, ProvidersSnapshot, ServiceConfig};
use crate::session::{
    Message, Notification, ResponseStateMachine, SessionObserver, SessionOutcome, SessionPhase,
};
use crate::stream::{EventReader, RouterEvent};
use crate::transport::{QueryRequest, Transport};
use futures::StreamExt;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Shown when the query could not be submitted
pub const OPEN_FAILED_MESSAGE: &str = "could not reach the routing service";

/// Shown when reading the response body failed midway
pub const STREAM_BROKEN_MESSAGE: &str = "the response stream was interrupted";

/// Shown when the body ended without `complete` or a terminal error
pub const STREAM_ENDED_MESSAGE: &str = "stream ended before the response completed";

/// Runs one query at a time against the routing service
pub struct SessionController {
    transport: Arc<dyn Transport>,
    default_provider: Option<String>,
    stream_idle_timeout: Duration,
    /// Cancellation handle of the session in flight, if any
    in_flight: Mutex<Option<CancellationToken>>,
    transcript: Mutex<Vec<Message>>,
    providers: Arc<RwLock<Option<ProvidersSnapshot>>>,
}

/// Releases the single-flight slot when the session ends, however it ends
struct InFlightGuard<'a> {
    slot: &'a Mutex<Option<CancellationToken>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

impl SessionController {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            default_provider: config.default_provider.clone(),
            stream_idle_timeout: config.timeouts.stream_idle_timeout(),
            in_flight: Mutex::new(None),
            transcript: Mutex::new(Vec::new()),
            providers: Arc::new(RwLock::new(None)),
        }
    }

    /// Override the longest silence tolerated between two chunks
    pub fn with_stream_idle_timeout(mut self, timeout: Duration) -> Self {
        self.stream_idle_timeout = timeout;
        self
    }

    /// Run one query to its terminal outcome
    ///
    /// Transport problems do not surface as `Err`: they end the session as
    /// [`SessionOutcome::Failed`] so that the observer always sees a
    /// `SessionEnd`. Errors are returned only when the query is rejected
    /// before it starts (blank query, another session in flight).
    pub async fn submit(
        &self,
        query: &str,
        preferred_provider: Option<&str>,
        observer: &mut dyn SessionObserver,
    ) -> RouteChatResult<SessionReport> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RouteChatError::invalid_input_field(
                "Query must not be empty",
                "query",
            ));
        }

        let (_guard, cancel) = self.begin_session()?;

        let provider = preferred_provider
            .map(str::to_string)
            .or_else(|| self.default_provider.clone());
        let assistant = Message::assistant_placeholder();
        {
            let mut transcript = self.transcript.lock();
            transcript.push(Message::user(query));
            transcript.push(assistant.clone());
        }

        info!(provider = ?provider, "submitting query");
        let request = QueryRequest::new(query, provider);
        let mut session = ActiveSession {
            machine: ResponseStateMachine::new(),
            assistant,
            outcome: None,
            observer,
            transcript: &self.transcript,
        };

        self.drive(&request, &cancel, &mut session).await;

        let ActiveSession {
            machine,
            assistant,
            outcome,
            ..
        } = session;
        let state = machine.into_state();
        let outcome = outcome.unwrap_or_else(|| outcome_from_phase(state.phase));
        info!(
            outcome = outcome_label(&outcome),
            chars = state.accumulated_text.len(),
            "session finished"
        );

        self.refresh_providers();

        Ok(SessionReport {
            outcome,
            state,
            message: assistant,
        })
    }

    /// Pump the transport into the state machine until the session is terminal
    async fn drive(
        &self,
        request: &QueryRequest,
        cancel: &CancellationToken,
        session: &mut ActiveSession<'_>,
    ) {
        let opened = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            opened = self.transport.open_query(request) => Some(opened),
        };

        let mut stream = match opened {
            None => {
                session.cancel();
                return;
            }
            Some(Err(e)) => {
                warn!(error = %e, "failed to open query stream");
                session.fail(OPEN_FAILED_MESSAGE);
                return;
            }
            Some(Ok(stream)) => stream,
        };

        let mut reader = EventReader::new();
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("session cancelled while streaming");
                    session.cancel();
                    return;
                }
                next = tokio::time::timeout(self.stream_idle_timeout, stream.next()) => next,
            };

            match next {
                Err(_) => {
                    let idle = self.stream_idle_timeout;
                    warn!(?idle, "no data from the routing service, giving up");
                    session.fail(&format!("no data received for {:?}", idle));
                    return;
                }
                Ok(Some(Ok(chunk))) => {
                    for event in reader.feed(&chunk) {
                        session.apply(event);
                    }
                    if session.is_terminal() {
                        return;
                    }
                }
                Ok(Some(Err(e))) => {
                    warn!(error = %e, "response stream failed");
                    session.fail(STREAM_BROKEN_MESSAGE);
                    return;
                }
                Ok(None) => {
                    for event in reader.finish() {
                        session.apply(event);
                    }
                    if !session.is_terminal() {
                        warn!(
                            events = reader.events_read(),
                            "stream ended without a terminal event"
                        );
                        session.fail(STREAM_ENDED_MESSAGE);
                    }
                    return;
                }
            }
        }
    }

    fn begin_session(&self) -> RouteChatResult<(InFlightGuard<'_>, CancellationToken)> {
        let mut slot = self.in_flight.lock();
        if slot.is_some() {
            return Err(RouteChatError::SessionInFlight);
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        Ok((
            InFlightGuard {
                slot: &self.in_flight,
            },
            token,
        ))
    }

    /// Abandon the session in flight
    ///
    /// Returns `false` when there was nothing to cancel.
    pub fn cancel(&self) -> bool {
        match self.in_flight.lock().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    /// Every message exchanged so far, oldest first
    pub fn transcript(&self) -> Vec<Message> {
        self.transcript.lock().clone()
    }

    /// Latest provider roster, if one has been fetched
    pub fn cached_providers(&self) -> Option<ProvidersSnapshot> {
        self.providers.read().clone()
    }

    /// Fetch the provider roster and cache it
    pub async fn load_providers(&self) -> RouteChatResult<ProvidersSnapshot> {
        let snapshot = self.transport.fetch_providers().await?;
        *self.providers.write() = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Refresh the roster in the background; failures are only logged
    pub fn refresh_providers(&self) {
        let transport = Arc::clone(&self.transport);
        let cache = Arc::clone(&self.providers);
        tokio::spawn(async move {
            match transport.fetch_providers().await {
                Ok(snapshot) => {
                    debug!(
                        available = snapshot.available_count(),
                        "provider roster refreshed"
                    );
                    *cache.write() = Some(snapshot);
                }
                Err(e) => warn!(error = %e, "failed to refresh provider roster"),
            }
        });
    }

    pub async fn health(&self) -> RouteChatResult<HealthReport> {
        self.transport.fetch_health().await
    }

    pub async fn service_config(&self) -> RouteChatResult<ServiceConfig> {
        self.transport.fetch_service_config().await
    }
}

/// Per-session plumbing between the state machine and the outside world
struct ActiveSession<'a> {
    machine: ResponseStateMachine,
    assistant: Message,
    outcome: Option<SessionOutcome>,
    observer: &'a mut dyn SessionObserver,
    transcript: &'a Mutex<Vec<Message>>,
}

impl ActiveSession<'_> {
    fn apply(&mut self, event: RouterEvent) {
        let notifications = self.machine.apply(event);
        self.dispatch(notifications);
    }

    fn fail(&mut self, error: &str) {
        let notifications = self.machine.fail(error);
        self.dispatch(notifications);
    }

    fn cancel(&mut self) {
        let notifications = self.machine.cancel();
        self.dispatch(notifications);
    }

    fn is_terminal(&self) -> bool {
        self.machine.is_terminal()
    }

    fn dispatch(&mut self, notifications: Vec<Notification>) {
        for notification in notifications {
            match &notification {
                Notification::MessageUpdate(update) => {
                    self.assistant.apply_update(update);
                    sync_message(self.transcript, &self.assistant);
                }
                Notification::SessionEnd(outcome) => self.outcome = Some(outcome.clone()),
                Notification::RoutingUpdate(_) => {}
            }
            self.observer.notify(&notification);
        }
    }
}

fn sync_message(transcript: &Mutex<Vec<Message>>, message: &Message) {
    if let Some(entry) = transcript.lock().iter_mut().rev().find(|m| m.id == message.id) {
        entry.clone_from(message);
    }
}

fn outcome_from_phase(phase: SessionPhase) -> SessionOutcome {
    match phase {
        SessionPhase::Completed => SessionOutcome::Completed {
            diagnostics: serde_json::Value::Null,
        },
        _ => SessionOutcome::Failed {
            error: STREAM_ENDED_MESSAGE.to_string(),
        },
    }
}

fn outcome_label(outcome: &SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::Completed { .. } => "completed",
        SessionOutcome::Failed { .. } => "failed",
        SessionOutcome::Cancelled => "cancelled",
    }
}
