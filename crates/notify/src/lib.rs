//! Transient user-visible notifications.
//!
//! [`NotificationQueue`] is a bounded, ordered queue whose entries expire
//! independently: each enqueue schedules its own cancellable expiry task,
//! so a manual dismissal can never race a pending auto-dismiss. Interested
//! hosts subscribe to a broadcast stream of [`NotificationEvent`]s to
//! render the queue.

pub mod events;
pub mod queue;

pub use events::NotificationEvent;
pub use queue::{Notification, NotificationQueue, DEFAULT_CAPACITY, DEFAULT_TTL_MS};
