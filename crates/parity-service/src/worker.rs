//! Background driver that fires batch windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing;

use crate::dashboard::DashboardSession;

/// Periodically flushes due notification batches for a session.
pub struct FlushWorker;

impl FlushWorker {
    /// Spawn the flush loop on the current tokio runtime.
    ///
    /// The loop checks for due batches every `tick` and stops when
    /// `shutdown` turns `true` or its sender is dropped. On the way out it
    /// flushes whatever is still collecting, so no action goes unreported.
    pub fn spawn(
        session: Arc<DashboardSession>,
        tick: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!("Notification flush worker started (tick {:?})", tick);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let created = session.flush_due();
                        if created > 0 {
                            tracing::debug!("Flush worker created {} notification(s)", created);
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            let created = session.flush_pending();
            tracing::info!(
                "Notification flush worker stopped ({} notification(s) flushed on shutdown)",
                created
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parity_core::config::DashboardConfig;
    use parity_core::traits::clock::ManualClock;
    use parity_core::types::id::ViolationId;
    use parity_entity::user::Role;

    use crate::context::SessionContext;
    use crate::violation::mock::MockViolationGenerator;

    fn session(clock: Arc<ManualClock>) -> Arc<DashboardSession> {
        let session = DashboardSession::new(
            DashboardConfig::default(),
            SessionContext::new(Role::Intermediate),
            clock,
        );
        session.load_violations(MockViolationGenerator::new(5).with_resolved_ratio(0.0).generate(10));
        Arc::new(session)
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_flushes_after_window() {
        let clock = Arc::new(ManualClock::default());
        let session = session(clock.clone());
        let (tx, rx) = watch::channel(false);
        let handle = FlushWorker::spawn(session.clone(), Duration::from_millis(100), rx);

        session.update_reason(&ViolationId::from("v1"), "Other");
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(session.unread_count(Role::Corporate), 0);

        clock.advance(Duration::from_millis(1000));
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(session.unread_count(Role::Corporate), 1);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_open_batches() {
        let clock = Arc::new(ManualClock::default());
        let session = session(clock);
        let (tx, rx) = watch::channel(false);
        let handle = FlushWorker::spawn(session.clone(), Duration::from_millis(100), rx);

        session.update_reason(&ViolationId::from("v2"), "Other");
        drop(tx);
        handle.await.unwrap();

        let notes = session.notifications(Role::Corporate);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].violation_ids(), &[ViolationId::from("v2")]);
    }
}
