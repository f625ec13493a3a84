//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// The user action a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// A reason was assigned to one or more violations.
    ReasonUpdated,
    /// One or more violations were escalated ("buzzed") to a lower tier.
    BuzzAssigned,
}

impl NotificationKind {
    /// Return the kind as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReasonUpdated => "reason-updated",
            Self::BuzzAssigned => "buzz-assigned",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
