//! Integration tests for reason-update and escalation notification flows.

mod helpers;

use helpers::{TestSession, ids};
use parity_core::types::id::ViolationId;
use parity_entity::notification::NotificationKind;
use parity_entity::user::Role;
use parity_service::{EscalateOutcome, ReasonUpdateOutcome};

#[test]
fn test_single_reason_update_reaches_corporate() {
    let mut v1 = parity_service::violation::MockViolationGenerator::new(1)
        .with_resolved_ratio(0.0)
        .generate(1);
    v1[0].reason.clear();
    let t = TestSession::new(Role::Intermediate, v1);

    assert_eq!(
        t.session
            .update_reason(&ViolationId::from("v1"), "Rate plan difference"),
        ReasonUpdateOutcome::Applied { queued: true }
    );
    assert_eq!(t.session.unread_count(Role::Corporate), 0);

    assert_eq!(t.settle(), 1);
    let notes = t.session.notifications(Role::Corporate);
    assert_eq!(notes.len(), 1);
    assert_eq!(t.session.unread_count(Role::Corporate), 1);
    let n = &notes[0];
    assert_eq!(n.kind, NotificationKind::ReasonUpdated);
    assert!(n.payload.is_batch());
    assert_eq!(n.violation_ids(), ids(&["v1"]).as_slice());
    assert_eq!(n.payload.count(), 1);
    assert_eq!(n.message, "1 Violation(s) have been updated.");
    assert_eq!(n.title, "Reason Updates");
    assert!(n.is_unread());
    assert_eq!(
        t.session
            .violations()
            .get(&ViolationId::from("v1"))
            .unwrap()
            .reason,
        "Rate plan difference"
    );
}

#[test]
fn test_corporate_escalations_fan_out_to_both_tiers() {
    let t = TestSession::with_mock(Role::Corporate, 10);

    assert_eq!(t.session.escalate(&ViolationId::from("v5")), EscalateOutcome::Queued);
    t.advance_ms(300);
    assert_eq!(t.session.escalate(&ViolationId::from("v6")), EscalateOutcome::Queued);

    assert_eq!(t.settle(), 2);
    for audience in [Role::Intermediate, Role::SingleProperty] {
        let notes = t.session.notifications(audience);
        assert_eq!(notes.len(), 1, "audience {audience}");
        assert_eq!(notes[0].kind, NotificationKind::BuzzAssigned);
        assert_eq!(notes[0].violation_ids(), ids(&["v5", "v6"]).as_slice());
        assert_eq!(notes[0].payload.count(), 2);
        assert_eq!(notes[0].recipient.as_deref(), Some(audience.label()));
        assert_eq!(notes[0].actor, "Corporate");
        assert_eq!(notes[0].message, "2 Violation(s) have been buzzed.");
    }
    assert!(t.session.notifications(Role::Corporate).is_empty());
}

#[test]
fn test_intermediate_escalation_reaches_single_property_only() {
    let t = TestSession::with_mock(Role::Intermediate, 5);
    t.session.escalate(&ViolationId::from("v2"));
    assert_eq!(t.settle(), 1);
    assert_eq!(t.session.unread_count(Role::SingleProperty), 1);
    assert_eq!(t.session.unread_count(Role::Corporate), 0);
    assert_eq!(t.session.unread_count(Role::Intermediate), 0);
}

#[test]
fn test_same_violation_twice_in_one_window_counted_once() {
    let t = TestSession::with_mock(Role::SingleProperty, 5);
    t.session.update_reason(&ViolationId::from("v3"), "Other");
    t.advance_ms(100);
    t.session.update_reason(&ViolationId::from("v3"), "Promotional rate");
    t.settle();

    let notes = t.session.notifications(Role::Corporate);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].violation_ids(), ids(&["v3"]).as_slice());
    assert_eq!(notes[0].payload.count(), 1);
}

#[test]
fn test_blank_reason_never_notifies() {
    let t = TestSession::with_mock(Role::Intermediate, 5);
    assert_eq!(
        t.session.update_reason(&ViolationId::from("v1"), ""),
        ReasonUpdateOutcome::Applied { queued: false }
    );
    assert_eq!(t.settle(), 0);
    assert!(t.session.notification_store().is_empty());
}

#[test]
fn test_batch_flushes_within_first_window_under_activity() {
    let t = TestSession::with_mock(Role::Intermediate, 20);
    t.session.update_reason(&ViolationId::from("v1"), "Other");
    // Keep editing every 250ms; the first batch must still close at 1000ms.
    for n in 2..=4 {
        t.advance_ms(250);
        t.session
            .update_reason(&ViolationId::from(format!("v{n}").as_str()), "Other");
    }
    t.advance_ms(250);
    assert_eq!(t.session.flush_due(), 1);
    assert_eq!(
        t.session.notifications(Role::Corporate)[0].violation_ids(),
        ids(&["v1", "v2", "v3", "v4"]).as_slice()
    );

    // Activity after the flush starts a new batch, never the old one.
    t.session.update_reason(&ViolationId::from("v5"), "Other");
    t.settle();
    let notes = t.session.notifications(Role::Corporate);
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].violation_ids(), ids(&["v5"]).as_slice());
}

#[test]
fn test_reason_and_buzz_batches_are_independent() {
    let t = TestSession::with_mock(Role::Intermediate, 10);
    t.session.update_reason(&ViolationId::from("v1"), "Other");
    t.session.escalate(&ViolationId::from("v2"));
    t.session.escalate(&ViolationId::from("v3"));
    assert_eq!(t.settle(), 2);

    let corporate = t.session.notifications(Role::Corporate);
    assert_eq!(corporate.len(), 1);
    assert_eq!(corporate[0].violation_ids(), ids(&["v1"]).as_slice());

    let property = t.session.notifications(Role::SingleProperty);
    assert_eq!(property.len(), 1);
    assert_eq!(property[0].violation_ids(), ids(&["v2", "v3"]).as_slice());
}

#[test]
fn test_unknown_ids_are_noops() {
    let t = TestSession::with_mock(Role::Intermediate, 3);
    let ghost = ViolationId::from("ghost");
    assert_eq!(
        t.session.update_reason(&ghost, "Other"),
        ReasonUpdateOutcome::UnknownViolation
    );
    assert_eq!(t.session.escalate(&ghost), EscalateOutcome::UnknownViolation);
    assert_eq!(t.settle(), 0);
}
