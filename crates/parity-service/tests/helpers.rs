//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use parity_core::config::DashboardConfig;
use parity_core::traits::clock::ManualClock;
use parity_core::types::id::ViolationId;
use parity_entity::user::Role;
use parity_entity::violation::Violation;
use parity_service::violation::MockViolationGenerator;
use parity_service::{DashboardSession, SessionContext};

/// A session driven by a manual clock.
pub struct TestSession {
    /// The session under test.
    pub session: DashboardSession,
    /// The clock the session reads.
    pub clock: Arc<ManualClock>,
}

impl TestSession {
    /// Session for `role` holding `violations`.
    pub fn new(role: Role, violations: Vec<Violation>) -> Self {
        let clock = Arc::new(ManualClock::default());
        let session = DashboardSession::new(
            DashboardConfig::default(),
            SessionContext::new(role),
            clock.clone(),
        );
        session.load_violations(violations);
        Self { session, clock }
    }

    /// Session holding `count` unresolved mock violations `v1..=v{count}`.
    pub fn with_mock(role: Role, count: usize) -> Self {
        Self::new(
            role,
            MockViolationGenerator::new(99)
                .with_resolved_ratio(0.0)
                .generate(count),
        )
    }

    /// Move time forward.
    pub fn advance_ms(&self, ms: u64) {
        self.clock.advance(Duration::from_millis(ms));
    }

    /// Move past one full batch window and flush.
    pub fn settle(&self) -> usize {
        self.advance_ms(self.session.config().notifications.batch_window_ms);
        self.session.flush_due()
    }
}

/// Parse a list of ids.
pub fn ids(raw: &[&str]) -> Vec<ViolationId> {
    raw.iter().map(|s| ViolationId::from(*s)).collect()
}
