//! One user's dashboard session.
//!
//! [`DashboardSession`] owns the violation store, the notification store,
//! the aggregator and the table view state, and exposes the operations
//! the UI layer calls. Every operation returns immediately; notifications
//! appear once [`DashboardSession::flush_due`] runs after a batch window.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use parity_core::config::DashboardConfig;
use parity_core::traits::clock::Clock;
use parity_core::types::id::{NotificationId, ViolationId};
use parity_core::types::pagination::{PageRequest, PageResponse, paginate};
use parity_entity::notification::{Notification, NotificationKind};
use parity_entity::user::Role;
use parity_entity::violation::{Violation, ViolationPatch};

use crate::context::SessionContext;
use crate::notification::aggregator::{NotificationAggregator, ReadyBatch};
use crate::notification::formatter::NotificationFormatter;
use crate::notification::rules::RoleRouter;
use crate::notification::store::{NotificationEvent, NotificationStore};
use crate::violation::filter::{FilterState, filter_violations};
use crate::violation::store::ViolationStore;
use crate::violation::summary::ViolationSummary;

/// The visible page of the violation table.
///
/// `total_items` is the size of the whole filtered list.
pub type FilteredPage = PageResponse<Violation>;

/// Result of [`DashboardSession::update_reason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonUpdateOutcome {
    /// The reason was stored. `queued` tells whether it entered a
    /// notification batch.
    Applied {
        /// Whether a notification will follow.
        queued: bool,
    },
    /// No violation with that id; nothing changed.
    UnknownViolation,
    /// The value is not in the reason vocabulary; nothing changed.
    RejectedReason,
}

/// Result of [`DashboardSession::escalate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalateOutcome {
    /// The escalation joined a notification batch.
    Queued,
    /// The acting role has nobody below it; nothing is sent.
    NoRecipients,
    /// The violation already has a reason; nothing changed.
    AlreadyResolved,
    /// No violation with that id; nothing changed.
    UnknownViolation,
}

/// Filter selection and pager position of the violation table.
#[derive(Debug, Clone)]
struct TableView {
    filters: FilterState,
    page: u64,
    page_size: u64,
}

/// State and operations of one dashboard session.
#[derive(Debug)]
pub struct DashboardSession {
    config: DashboardConfig,
    context: SessionContext,
    clock: Arc<dyn Clock>,
    violations: ViolationStore,
    notifications: NotificationStore,
    aggregator: Mutex<NotificationAggregator>,
    view: Mutex<TableView>,
}

impl DashboardSession {
    /// Create a session with empty stores.
    pub fn new(config: DashboardConfig, context: SessionContext, clock: Arc<dyn Clock>) -> Self {
        let aggregator = NotificationAggregator::new(config.notifications.batch_window());
        let notifications = NotificationStore::new(config.notifications.channel_buffer_size);
        let view = TableView {
            filters: FilterState::default(),
            page: 1,
            page_size: config.filter.default_page_size,
        };
        Self {
            config,
            context,
            clock,
            violations: ViolationStore::new(),
            notifications,
            aggregator: Mutex::new(aggregator),
            view: Mutex::new(view),
        }
    }

    /// The active role.
    pub fn role(&self) -> Role {
        self.context.role
    }

    /// The session context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Configuration in effect.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Direct access to the violation store.
    pub fn violations(&self) -> &ViolationStore {
        &self.violations
    }

    /// Direct access to the notification store.
    pub fn notification_store(&self) -> &NotificationStore {
        &self.notifications
    }

    /// Replace the violation list (page load or data refresh).
    pub fn load_violations(&self, list: Vec<Violation>) {
        self.violations.set_all(list);
        self.view().page = 1;
    }

    // -- Violation actions --------------------------------------------------

    /// Assign (or clear, with `""`) the reason of one violation.
    ///
    /// Non-blank reasons set by Intermediate or SingleProperty users are
    /// batched into a "Reason Updates" notification for Corporate.
    pub fn update_reason(&self, id: &ViolationId, reason: &str) -> ReasonUpdateOutcome {
        if !self.config.reasons.accepts(reason) {
            warn!(violation_id = %id, reason, "Reason not in vocabulary, ignored");
            return ReasonUpdateOutcome::RejectedReason;
        }
        if !self.violations.update(id, &ViolationPatch::reason(reason)) {
            return ReasonUpdateOutcome::UnknownViolation;
        }

        let role = self.role();
        if !RoleRouter::reason_update_notifies(role, reason) {
            debug!(violation_id = %id, %role, "Reason stored without notification");
            return ReasonUpdateOutcome::Applied { queued: false };
        }

        self.aggregator().record(
            NotificationKind::ReasonUpdated,
            role,
            id.clone(),
            self.clock.now(),
        );
        ReasonUpdateOutcome::Applied { queued: true }
    }

    /// Escalate ("buzz") one violation to the tiers below the acting role.
    pub fn escalate(&self, id: &ViolationId) -> EscalateOutcome {
        let Some(violation) = self.violations.get(id) else {
            debug!(violation_id = %id, "Escalation for unknown violation ignored");
            return EscalateOutcome::UnknownViolation;
        };
        if violation.is_resolved() {
            warn!(violation_id = %id, "Escalation of resolved violation ignored");
            return EscalateOutcome::AlreadyResolved;
        }

        let role = self.role();
        if RoleRouter::route(NotificationKind::BuzzAssigned, role).is_terminal() {
            debug!(violation_id = %id, %role, "Escalation has no downstream tier");
            return EscalateOutcome::NoRecipients;
        }

        self.aggregator().record(
            NotificationKind::BuzzAssigned,
            role,
            id.clone(),
            self.clock.now(),
        );
        EscalateOutcome::Queued
    }

    // -- Table view ---------------------------------------------------------

    /// Replace the active filters. Always returns the pager to page 1.
    pub fn select_filters(&self, filters: FilterState) {
        let mut view = self.view();
        view.filters = filters;
        view.page = 1;
    }

    /// Current filters.
    pub fn filters(&self) -> FilterState {
        self.view().filters.clone()
    }

    /// Move to page `n`, clamped to the pages the current filters produce.
    pub fn change_page(&self, n: u64) {
        let total = self.filtered().len() as u64;
        let mut view = self.view();
        let total_pages = FilteredPage::page_count(total, view.page_size);
        view.page = n.clamp(1, total_pages);
    }

    /// Change rows per page (clamped to the configured maximum) and go to page 1.
    pub fn set_page_size(&self, page_size: u64) {
        let mut view = self.view();
        view.page_size = PageRequest::with_max(1, page_size, self.config.filter.max_page_size).page_size;
        view.page = 1;
    }

    /// The visible page of the filtered violation list.
    pub fn filtered_page(&self) -> FilteredPage {
        let (filters, request) = {
            let view = self.view();
            (
                view.filters.clone(),
                PageRequest::with_max(view.page, view.page_size, self.config.filter.max_page_size),
            )
        };
        paginate(filter_violations(&self.violations.all(), &filters), request)
    }

    /// KPI figures over the filtered list.
    pub fn summary(&self) -> ViolationSummary {
        ViolationSummary::from_violations(&self.filtered())
    }

    // -- Notification flow --------------------------------------------------

    /// Turn every batch whose window has elapsed into notifications.
    ///
    /// Returns the number of notification records created.
    pub fn flush_due(&self) -> usize {
        let now = self.clock.now();
        let ready = self.aggregator().take_due(now);
        self.deliver(ready, now)
    }

    /// Flush every batch immediately, due or not.
    pub fn flush_pending(&self) -> usize {
        let now = self.clock.now();
        let ready = self.aggregator().take_all();
        self.deliver(ready, now)
    }

    /// When the next batch window closes, if any batch is open.
    pub fn next_flush_at(&self) -> Option<DateTime<Utc>> {
        self.aggregator().next_deadline()
    }

    /// Notifications shown to `audience`, newest first.
    pub fn notifications(&self, audience: Role) -> Vec<Notification> {
        self.notifications.list(audience)
    }

    /// Unread badge count for `audience`.
    pub fn unread_count(&self, audience: Role) -> usize {
        self.notifications.unread_count(audience)
    }

    /// Mark one notification read. Unknown ids are ignored.
    pub fn mark_as_read(&self, id: NotificationId) -> bool {
        self.notifications.mark_read(id, self.clock.now())
    }

    /// Mark every notification read.
    pub fn mark_all_as_read(&self) -> usize {
        self.notifications.mark_all_read(self.clock.now())
    }

    /// Mark every notification of one audience read.
    pub fn mark_all_as_read_for(&self, audience: Role) -> usize {
        self.notifications
            .mark_all_read_for(audience, self.clock.now())
    }

    /// Remove every notification. Open batches are unaffected.
    pub fn clear_all(&self) -> usize {
        self.notifications.clear()
    }

    /// Subscribe to notification store changes.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.notifications.subscribe()
    }

    fn deliver(&self, ready: Vec<ReadyBatch>, now: DateTime<Utc>) -> usize {
        let actor_label = self.context.actor_label();
        let mut created = 0;
        for batch in ready {
            let route = RoleRouter::route(batch.kind, batch.actor);
            for audience in &route.recipients {
                let notification = NotificationFormatter::batch_notification(
                    &batch,
                    &route,
                    *audience,
                    &actor_label,
                    now,
                );
                self.notifications.insert(notification);
                created += 1;
            }
            info!(
                kind = %batch.kind,
                actor = %batch.actor,
                count = batch.batch.count(),
                recipients = route.recipients.len(),
                "Notification batch flushed"
            );
        }
        created
    }

    fn filtered(&self) -> Vec<Violation> {
        let filters = self.view().filters.clone();
        filter_violations(&self.violations.all(), &filters)
    }

    fn view(&self) -> std::sync::MutexGuard<'_, TableView> {
        self.view.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn aggregator(&self) -> std::sync::MutexGuard<'_, NotificationAggregator> {
        self.aggregator.lock().unwrap_or_else(|e| e.into_inner())
    }
}
