//! Response accumulation for one query
//!
//! [`ResponseStateMachine`] folds [`crate::stream::RouterEvent`]s into a
//! [`SessionState`] and reports each change as a [`Notification`], which a
//! [`SessionObserver`] turns into presentation updates.

mod machine;
mod message;
mod observer;
mod state;

pub use machine::{CANCELLED_MESSAGE, ResponseStateMachine, transition};
pub use message::{Message, Role};
pub use observer::{NoopObserver, SessionObserver};
pub use state::{
    MessageUpdate, Notification, SessionOutcome, SessionPhase, SessionState, UpdateKind,
};
