//! Bounded, self-expiring notification queue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::Utc;
use codevault_core::messages::NotificationKind;
use codevault_core::types::Timestamp;
use serde::Serialize;
use uuid::Uuid;

use crate::events::NotificationEvent;

/// Default time-to-live for a notification, in milliseconds.
pub const DEFAULT_TTL_MS: u64 = 5000;

/// Maximum number of simultaneously active notifications. When the queue
/// is full the oldest entry is evicted first.
pub const DEFAULT_CAPACITY: usize = 20;

/// Buffer capacity of the subscriber broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// A user-visible message with a bounded lifetime.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    /// Already-localized display text.
    pub message: String,
    pub created_at: Timestamp,
    pub ttl_ms: u64,
}

/// An active queue entry together with its pending expiry task.
struct Entry {
    notification: Notification,
    expiry: tokio::task::JoinHandle<()>,
}

struct Inner {
    entries: VecDeque<Entry>,
    capacity: usize,
}

/// Ordered queue of transient notifications.
///
/// Append order is display order. Every entry gets its own expiry task, so
/// entries with different TTLs expire independently and possibly out of
/// order. Dismissal cancels the pending expiry task; each notification is
/// destroyed exactly once, by whichever of the two happens first.
///
/// Cheap to clone; all clones share the same queue. Enqueueing spawns a
/// timer task and therefore must happen inside a Tokio runtime.
#[derive(Clone)]
pub struct NotificationQueue {
    inner: Arc<Mutex<Inner>>,
    events: tokio::sync::broadcast::Sender<NotificationEvent>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationQueue {
    /// Create a queue holding at most `capacity` active notifications.
    pub fn with_capacity(capacity: usize) -> Self {
        let (events, _) = tokio::sync::broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                entries: VecDeque::new(),
                capacity,
            })),
            events,
        }
    }

    /// Append a notification with the default TTL.
    pub fn enqueue(&self, kind: NotificationKind, message: impl Into<String>) -> Uuid {
        self.enqueue_with_ttl(kind, message, DEFAULT_TTL_MS)
    }

    /// Append a notification that auto-dismisses after `ttl_ms`.
    pub fn enqueue_with_ttl(
        &self,
        kind: NotificationKind,
        message: impl Into<String>,
        ttl_ms: u64,
    ) -> Uuid {
        let notification = Notification {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
            ttl_ms,
        };
        let id = notification.id;

        // Hold the lock across spawn + push: the expiry task cannot touch
        // the queue until the entry it targets is actually in it.
        let mut inner = lock(&self.inner);

        if inner.entries.len() >= inner.capacity {
            if let Some(oldest) = inner.entries.pop_front() {
                oldest.expiry.abort();
                tracing::debug!(
                    id = %oldest.notification.id,
                    capacity = inner.capacity,
                    "Notification queue full, evicting oldest entry"
                );
                let _ = self
                    .events
                    .send(NotificationEvent::Evicted(oldest.notification.id));
            }
        }

        let weak = Arc::downgrade(&self.inner);
        let events = self.events.clone();
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ttl_ms)).await;
            if let Some(shared) = Weak::upgrade(&weak) {
                let removed = remove_by_id(&mut lock(&shared), id);
                if removed.is_some() {
                    let _ = events.send(NotificationEvent::Expired(id));
                }
            }
        });

        inner.entries.push_back(Entry {
            notification: notification.clone(),
            expiry,
        });
        drop(inner);

        let _ = self.events.send(NotificationEvent::Added(notification));
        id
    }

    /// Remove a notification and cancel its expiry task.
    ///
    /// Idempotent: dismissing an id that is no longer (or never was) in the
    /// queue is a no-op returning `false`.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let entry = remove_by_id(&mut lock(&self.inner), id);
        match entry {
            Some(entry) => {
                entry.expiry.abort();
                let _ = self.events.send(NotificationEvent::Dismissed(id));
                true
            }
            None => false,
        }
    }

    /// Snapshot of active notifications in display order.
    pub fn active(&self) -> Vec<Notification> {
        lock(&self.inner)
            .entries
            .iter()
            .map(|e| e.notification.clone())
            .collect()
    }

    /// Number of active notifications.
    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    /// Whether no notifications are active.
    pub fn is_empty(&self) -> bool {
        lock(&self.inner).entries.is_empty()
    }

    /// Subscribe to queue lifecycle events.
    ///
    /// Slow receivers may observe `RecvError::Lagged`; events sent with no
    /// active receivers are silently dropped.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poison| poison.into_inner())
}

fn remove_by_id(inner: &mut Inner, id: Uuid) -> Option<Entry> {
    let pos = inner.entries.iter().position(|e| e.notification.id == id)?;
    inner.entries.remove(pos)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
