//! Notification store with read state and change events.

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use parity_core::types::id::NotificationId;
use parity_entity::notification::Notification;
use parity_entity::user::Role;

/// Change published to store subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A notification was added.
    Created {
        /// New notification.
        id: NotificationId,
        /// Audience it is shown to.
        audience: Role,
    },
    /// One notification was marked read.
    Read {
        /// The notification.
        id: NotificationId,
    },
    /// Several notifications were marked read at once.
    AllRead {
        /// Audience restricted to, if any.
        audience: Option<Role>,
        /// Number of notifications that changed.
        count: usize,
    },
    /// The store was emptied.
    Cleared {
        /// Number of notifications removed.
        count: usize,
    },
}

/// Ordered notification collection, newest first.
///
/// Read state only moves from unread to read; nothing un-reads a
/// notification. Unknown ids are ignored.
#[derive(Debug)]
pub struct NotificationStore {
    items: RwLock<VecDeque<Notification>>,
    events: broadcast::Sender<NotificationEvent>,
}

impl NotificationStore {
    /// Create an empty store whose event channel holds `buffer` messages.
    pub fn new(buffer: usize) -> Self {
        let (events, _) = broadcast::channel(buffer.max(1));
        Self {
            items: RwLock::new(VecDeque::new()),
            events,
        }
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.events.subscribe()
    }

    /// Add a notification at the front.
    pub fn insert(&self, notification: Notification) {
        let event = NotificationEvent::Created {
            id: notification.id,
            audience: notification.audience,
        };
        self.items
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push_front(notification);
        self.publish(event);
    }

    /// Notifications for one audience, newest first.
    pub fn list(&self, audience: Role) -> Vec<Notification> {
        let mut out: Vec<Notification> = self
            .items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|n| n.audience == audience)
            .cloned()
            .collect();
        // Stable: ties keep most-recently-inserted first.
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Every notification, newest first.
    pub fn all(&self) -> Vec<Notification> {
        let mut out: Vec<Notification> = self
            .items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Look up one notification.
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    /// Unread notifications for one audience.
    pub fn unread_count(&self, audience: Role) -> usize {
        self.items
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|n| n.audience == audience && n.is_unread())
            .count()
    }

    /// Mark one notification read. Returns `false` if unknown or already read.
    pub fn mark_read(&self, id: NotificationId, at: DateTime<Utc>) -> bool {
        let changed = self
            .items
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .iter_mut()
            .find(|n| n.id == id)
            .is_some_and(|n| n.mark_read(at));
        if changed {
            self.publish(NotificationEvent::Read { id });
        } else {
            debug!(notification_id = %id, "mark_read had no effect");
        }
        changed
    }

    /// Mark every notification read. Returns how many changed.
    pub fn mark_all_read(&self, at: DateTime<Utc>) -> usize {
        self.mark_matching_read(None, at)
    }

    /// Mark every notification of one audience read. Returns how many changed.
    pub fn mark_all_read_for(&self, audience: Role, at: DateTime<Utc>) -> usize {
        self.mark_matching_read(Some(audience), at)
    }

    /// Remove every notification. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let count = {
            let mut items = self.items.write().unwrap_or_else(|e| e.into_inner());
            let count = items.len();
            items.clear();
            count
        };
        self.publish(NotificationEvent::Cleared { count });
        count
    }

    /// Total notifications held.
    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn mark_matching_read(&self, audience: Option<Role>, at: DateTime<Utc>) -> usize {
        let count = self
            .items
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .iter_mut()
            .filter(|n| audience.is_none_or(|a| n.audience == a))
            .map(|n| n.mark_read(at))
            .filter(|changed| *changed)
            .count();
        if count > 0 {
            self.publish(NotificationEvent::AllRead { audience, count });
        }
        count
    }

    fn publish(&self, event: NotificationEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
