//! Role routing rules: who receives which aggregated notification.
//!
//! Reason updates travel up to Corporate; escalations travel down the
//! hierarchy Corporate -> Intermediate -> SingleProperty. Every
//! (kind, role) pair resolves to a defined, possibly empty, route.

use serde::Serialize;

use parity_entity::notification::NotificationKind;
use parity_entity::user::Role;

/// Recipients and wording for one (kind, acting role) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Audiences that each get their own notification record.
    pub recipients: Vec<Role>,
    /// Past-tense verb for the summary message.
    pub verb: &'static str,
    /// Notification heading.
    pub title: &'static str,
}

impl Route {
    /// Whether nobody is notified.
    pub fn is_terminal(&self) -> bool {
        self.recipients.is_empty()
    }
}

/// Pure mapping from action kind and acting role to a [`Route`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleRouter;

impl RoleRouter {
    /// Resolve the route for an action.
    pub fn route(kind: NotificationKind, actor: Role) -> Route {
        match kind {
            NotificationKind::ReasonUpdated => Route {
                // Reason changes flow up to Corporate from any lower tier.
                recipients: if actor.tier() < Role::Corporate.tier() {
                    vec![Role::Corporate]
                } else {
                    Vec::new()
                },
                verb: "updated",
                title: "Reason Updates",
            },
            NotificationKind::BuzzAssigned => Route {
                recipients: actor.downstream().to_vec(),
                verb: "buzzed",
                title: "Buzz Assigned",
            },
        }
    }

    /// Whether a reason change should enter the notification flow.
    ///
    /// Corporate edits never notify, and clearing a reason never notifies.
    pub fn reason_update_notifies(actor: Role, new_reason: &str) -> bool {
        !new_reason.is_empty() && !Self::route(NotificationKind::ReasonUpdated, actor).is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_updates_go_to_corporate() {
        for actor in [Role::Intermediate, Role::SingleProperty] {
            let route = RoleRouter::route(NotificationKind::ReasonUpdated, actor);
            assert_eq!(route.recipients, vec![Role::Corporate]);
            assert_eq!(route.title, "Reason Updates");
        }
        assert!(RoleRouter::route(NotificationKind::ReasonUpdated, Role::Corporate).is_terminal());
    }

    #[test]
    fn test_buzz_flows_down() {
        assert_eq!(
            RoleRouter::route(NotificationKind::BuzzAssigned, Role::Corporate).recipients,
            vec![Role::Intermediate, Role::SingleProperty]
        );
        assert_eq!(
            RoleRouter::route(NotificationKind::BuzzAssigned, Role::Intermediate).recipients,
            vec![Role::SingleProperty]
        );
        assert!(RoleRouter::route(NotificationKind::BuzzAssigned, Role::SingleProperty).is_terminal());
    }

    #[test]
    fn test_every_pair_is_defined_and_never_self_addressed() {
        for kind in [NotificationKind::ReasonUpdated, NotificationKind::BuzzAssigned] {
            for actor in Role::ALL {
                let route = RoleRouter::route(kind, actor);
                assert!(!route.verb.is_empty());
                assert!(!route.recipients.contains(&actor));
            }
        }
    }

    #[test]
    fn test_reason_update_policy() {
        assert!(RoleRouter::reason_update_notifies(Role::Intermediate, "Other"));
        assert!(RoleRouter::reason_update_notifies(Role::SingleProperty, "Other"));
        assert!(!RoleRouter::reason_update_notifies(Role::Intermediate, ""));
        assert!(!RoleRouter::reason_update_notifies(Role::Corporate, "Other"));
    }
}
