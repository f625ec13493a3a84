//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parity_core::types::id::{NotificationId, ViolationId};
use parity_core::{AppError, AppResult};

use super::kind::NotificationKind;
use crate::user::Role;

/// A de-duplicated, ordered set of violation ids with its size.
///
/// The count is derived from the ids, so it can never disagree with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationBatch {
    violation_ids: Vec<ViolationId>,
}

impl ViolationBatch {
    /// Build a batch, dropping repeated ids while keeping first-seen order.
    pub fn new(ids: impl IntoIterator<Item = ViolationId>) -> Self {
        let mut violation_ids: Vec<ViolationId> = Vec::new();
        for id in ids {
            if !violation_ids.contains(&id) {
                violation_ids.push(id);
            }
        }
        Self { violation_ids }
    }

    /// The ids in the batch.
    pub fn ids(&self) -> &[ViolationId] {
        &self.violation_ids
    }

    /// Number of distinct ids.
    pub fn count(&self) -> usize {
        self.violation_ids.len()
    }
}

/// What a notification refers to.
///
/// Serialized in the dashboard's JSON shape: the single form carries
/// `violationId`, the batch form carries `violationIds` and `count`.
/// The two are told apart by the presence of `violationIds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PayloadRepr", into = "PayloadRepr")]
pub enum NotificationPayload {
    /// Direct notification about one violation.
    Single {
        /// The violation concerned.
        violation_id: ViolationId,
    },
    /// Summary notification about several violations.
    Batch(ViolationBatch),
}

impl NotificationPayload {
    /// Batch payload from any id sequence.
    pub fn batch(ids: impl IntoIterator<Item = ViolationId>) -> Self {
        Self::Batch(ViolationBatch::new(ids))
    }

    /// The violation ids covered, whichever form this is.
    pub fn violation_ids(&self) -> &[ViolationId] {
        match self {
            Self::Single { violation_id } => std::slice::from_ref(violation_id),
            Self::Batch(batch) => batch.ids(),
        }
    }

    /// Number of violations covered.
    pub fn count(&self) -> usize {
        self.violation_ids().len()
    }

    /// Decode a stored payload in either wire form.
    pub fn from_json(source: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    /// Whether this is the aggregated form.
    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    violation_id: Option<ViolationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    violation_ids: Option<Vec<ViolationId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
}

impl TryFrom<PayloadRepr> for NotificationPayload {
    type Error = AppError;

    fn try_from(repr: PayloadRepr) -> Result<Self, Self::Error> {
        // A stored `count` is ignored; it is recomputed from the ids.
        match (repr.violation_ids, repr.violation_id) {
            (Some(ids), _) => Ok(Self::batch(ids)),
            (None, Some(violation_id)) => Ok(Self::Single { violation_id }),
            (None, None) => Err(AppError::validation(
                "notification payload has neither violationId nor violationIds",
            )),
        }
    }
}

impl From<NotificationPayload> for PayloadRepr {
    fn from(payload: NotificationPayload) -> Self {
        match payload {
            NotificationPayload::Single { violation_id } => Self {
                violation_id: Some(violation_id),
                violation_ids: None,
                count: None,
            },
            NotificationPayload::Batch(batch) => Self {
                violation_id: None,
                count: Some(batch.count()),
                violation_ids: Some(batch.violation_ids),
            },
        }
    }
}

/// A user-facing record of one aggregated event, addressed to one audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Event kind.
    pub kind: NotificationKind,
    /// Role tier this notification is shown to.
    pub audience: Role,
    /// Violations concerned.
    pub payload: NotificationPayload,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Who performed the action.
    pub actor: String,
    /// Intended recipient label (escalations only).
    pub recipient: Option<String>,
    /// Whether the notification has been read.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was marked read.
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Violation ids covered by this notification.
    pub fn violation_ids(&self) -> &[ViolationId] {
        self.payload.violation_ids()
    }

    /// Mark read. Returns `false` if it was already read.
    pub fn mark_read(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_read {
            return false;
        }
        self.is_read = true;
        self.read_at = Some(at);
        true
    }
}
