//! # parity-service
//!
//! Behaviour behind the rate parity dashboard:
//!
//! - violation store, multi-facet filter engine and summaries
//! - notification aggregation with a fixed debounce window
//! - role-based routing of aggregated notifications
//! - notification store with read/unread state and change events
//! - a [`DashboardSession`] facade tying them together for one user
//!
//! Components receive their collaborators at construction time; nothing
//! here is process-global.

pub mod context;
pub mod dashboard;
pub mod notification;
pub mod violation;
pub mod worker;

pub use context::SessionContext;
pub use dashboard::{DashboardSession, EscalateOutcome, FilteredPage, ReasonUpdateOutcome};
pub use notification::{NotificationAggregator, NotificationStore, RoleRouter};
pub use violation::{FilterState, ViolationStore};
pub use worker::FlushWorker;
