//! Session context carrying the acting user's role.

use serde::{Deserialize, Serialize};

use parity_entity::user::Role;

/// Who is acting in the current dashboard session.
///
/// Exactly one role is active per session. It decides which events the
/// user's actions produce and which notifications they are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// The active role.
    pub role: Role,
    /// Optional display name of the user.
    pub display_name: Option<String>,
}

impl SessionContext {
    /// Context for an anonymous user acting in `role`.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            display_name: None,
        }
    }

    /// Attach a display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Actor text written into notifications.
    pub fn actor_label(&self) -> String {
        match &self.display_name {
            Some(name) => format!("{name} ({})", self.role.label()),
            None => self.role.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_label() {
        assert_eq!(SessionContext::new(Role::Intermediate).actor_label(), "Multi-Property");
        let ctx = SessionContext::new(Role::Corporate).with_display_name("Dana");
        assert_eq!(ctx.actor_label(), "Dana (Corporate)");
    }
}
