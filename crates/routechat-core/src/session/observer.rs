//! Presentation callbacks

use super::state::{MessageUpdate, Notification, SessionOutcome};
use crate::stream::RoutingInfo;

/// Receiver of session notifications, called synchronously in event order
///
/// Implementations only ever see snapshots; they cannot reach back into the
/// state machine.
pub trait SessionObserver: Send {
    fn on_routing_update(&mut self, _info: &RoutingInfo) {}

    fn on_message_update(&mut self, _update: &MessageUpdate) {}

    fn on_session_end(&mut self, _outcome: &SessionOutcome) {}

    /// Route a notification to the matching callback
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::RoutingUpdate(info) => self.on_routing_update(info),
            Notification::MessageUpdate(update) => self.on_message_update(update),
            Notification::SessionEnd(outcome) => self.on_session_end(outcome),
        }
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// Collects every notification, in order
impl SessionObserver for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}
