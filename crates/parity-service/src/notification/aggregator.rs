//! Batching of rapid per-violation actions into summary notifications.
//!
//! One batch exists per (kind, acting role). The first action opens the
//! batch and fixes its deadline at `now + window`; later actions join it
//! without moving the deadline, so a batch always flushes within one
//! window even under continuous activity. A flushed batch is removed
//! before it is handed out and is never reused.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace};

use parity_core::types::id::ViolationId;
use parity_entity::notification::{NotificationKind, ViolationBatch};
use parity_entity::user::Role;

/// Batch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BatchKey {
    kind: NotificationKind,
    actor: Role,
}

/// A batch still collecting actions.
#[derive(Debug)]
struct PendingBatch {
    ids: Vec<ViolationId>,
    opened_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
    seq: u64,
}

impl PendingBatch {
    fn seal(self, key: BatchKey) -> ReadyBatch {
        ReadyBatch {
            kind: key.kind,
            actor: key.actor,
            batch: ViolationBatch::new(self.ids),
            opened_at: self.opened_at,
            deadline: self.deadline,
            seq: self.seq,
        }
    }
}

/// A batch whose window has elapsed, ready to become notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyBatch {
    /// Action kind.
    pub kind: NotificationKind,
    /// Role that performed the actions.
    pub actor: Role,
    /// Distinct violation ids in first-seen order.
    pub batch: ViolationBatch,
    /// When the first action arrived.
    pub opened_at: DateTime<Utc>,
    /// When the window closed.
    pub deadline: DateTime<Utc>,
    seq: u64,
}

/// What [`NotificationAggregator::record`] did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new batch was opened and its window armed.
    Opened,
    /// The id joined the open batch.
    Appended,
    /// The id was already in the open batch.
    Duplicate,
}

/// Debounce state machine, one Idle/Collecting slot per (kind, actor).
///
/// Time is passed in explicitly, so the aggregator can be driven by any
/// clock or scheduler.
#[derive(Debug)]
pub struct NotificationAggregator {
    window: TimeDelta,
    pending: HashMap<BatchKey, PendingBatch>,
    /// Batches sealed early because an action arrived after their deadline.
    sealed: Vec<ReadyBatch>,
    next_seq: u64,
}

impl NotificationAggregator {
    /// Create an aggregator with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window: TimeDelta::from_std(window).unwrap_or(TimeDelta::MAX),
            pending: HashMap::new(),
            sealed: Vec::new(),
            next_seq: 0,
        }
    }

    /// Record one qualifying action.
    pub fn record(
        &mut self,
        kind: NotificationKind,
        actor: Role,
        violation_id: ViolationId,
        now: DateTime<Utc>,
    ) -> RecordOutcome {
        let key = BatchKey { kind, actor };

        // A due batch that has not been flushed yet is closed for new ids.
        if self.pending.get(&key).is_some_and(|b| b.deadline <= now) {
            if let Some(expired) = self.pending.remove(&key) {
                trace!(%kind, %actor, "Sealing expired batch before opening a new one");
                self.sealed.push(expired.seal(key));
            }
        }

        match self.pending.entry(key) {
            Entry::Occupied(mut open) => {
                let batch = open.get_mut();
                if batch.ids.contains(&violation_id) {
                    trace!(%kind, %actor, violation_id = %violation_id, "Duplicate id in open batch");
                    RecordOutcome::Duplicate
                } else {
                    batch.ids.push(violation_id);
                    debug!(%kind, %actor, size = batch.ids.len(), "Batch extended");
                    RecordOutcome::Appended
                }
            }
            Entry::Vacant(slot) => {
                let deadline = now.checked_add_signed(self.window).unwrap_or(DateTime::<Utc>::MAX_UTC);
                let seq = self.next_seq;
                self.next_seq += 1;
                slot.insert(PendingBatch {
                    ids: vec![violation_id],
                    opened_at: now,
                    deadline,
                    seq,
                });
                debug!(%kind, %actor, %deadline, "Batch opened");
                RecordOutcome::Opened
            }
        }
    }

    /// Remove and return every batch whose deadline is at or before `now`,
    /// in the order their windows were armed.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<ReadyBatch> {
        let due: Vec<BatchKey> = self
            .pending
            .iter()
            .filter(|(_, b)| b.deadline <= now)
            .map(|(k, _)| *k)
            .collect();
        for key in due {
            if let Some(batch) = self.pending.remove(&key) {
                self.sealed.push(batch.seal(key));
            }
        }
        let mut ready = std::mem::take(&mut self.sealed);
        ready.sort_by_key(|b| (b.deadline, b.seq));
        ready
    }

    /// Remove and return every batch regardless of deadline.
    ///
    /// Used at shutdown so no collected action goes unreported.
    pub fn take_all(&mut self) -> Vec<ReadyBatch> {
        let keys: Vec<BatchKey> = self.pending.keys().copied().collect();
        for key in keys {
            if let Some(batch) = self.pending.remove(&key) {
                self.sealed.push(batch.seal(key));
            }
        }
        let mut ready = std::mem::take(&mut self.sealed);
        ready.sort_by_key(|b| (b.deadline, b.seq));
        ready
    }

    /// Earliest instant at which [`take_due`](Self::take_due) will return something.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending
            .values()
            .map(|b| b.deadline)
            .chain(self.sealed.iter().map(|b| b.deadline))
            .min()
    }

    /// Ids collected so far in the open batch for (kind, actor).
    pub fn pending(&self, kind: NotificationKind, actor: Role) -> Option<&[ViolationId]> {
        self.pending
            .get(&BatchKey { kind, actor })
            .map(|b| b.ids.as_slice())
    }

    /// Whether nothing is collecting or waiting to be flushed.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.sealed.is_empty()
    }
}
