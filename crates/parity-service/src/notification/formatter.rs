//! Notification message formatting.

use chrono::{DateTime, Utc};

use parity_core::types::id::NotificationId;
use parity_entity::notification::{Notification, NotificationKind, NotificationPayload};
use parity_entity::user::Role;

use super::aggregator::ReadyBatch;
use super::rules::Route;

/// Builds notification records from flushed batches.
pub struct NotificationFormatter;

impl NotificationFormatter {
    /// Summary line, e.g. `"2 Violation(s) have been buzzed."`.
    pub fn summary_message(count: usize, verb: &str) -> String {
        format!("{count} Violation(s) have been {verb}.")
    }

    /// One unread notification for `audience` covering the whole batch.
    pub fn batch_notification(
        batch: &ReadyBatch,
        route: &Route,
        audience: Role,
        actor_label: &str,
        now: DateTime<Utc>,
    ) -> Notification {
        let payload = NotificationPayload::Batch(batch.batch.clone());
        let recipient = match batch.kind {
            NotificationKind::BuzzAssigned => Some(audience.label().to_string()),
            NotificationKind::ReasonUpdated => None,
        };
        Notification {
            id: NotificationId::new(),
            kind: batch.kind,
            audience,
            message: Self::summary_message(payload.count(), route.verb),
            payload,
            title: route.title.to_string(),
            actor: actor_label.to_string(),
            recipient,
            is_read: false,
            created_at: now,
            read_at: None,
        }
    }
}
