//! Queue lifecycle events for host UIs.

use uuid::Uuid;

use crate::queue::Notification;

/// What happened to a queue entry.
///
/// Broadcast to every subscriber of
/// [`NotificationQueue::subscribe`](crate::queue::NotificationQueue::subscribe).
/// Exactly one of `Dismissed`, `Expired`, or `Evicted` follows each `Added`.
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    /// A notification entered the queue.
    Added(Notification),
    /// Removed by an explicit dismissal.
    Dismissed(Uuid),
    /// Removed by its own expiry task.
    Expired(Uuid),
    /// Removed to make room for a newer entry.
    Evicted(Uuid),
}
