//! Notification aggregation, routing, formatting and storage.

pub mod aggregator;
pub mod formatter;
pub mod rules;
pub mod store;

pub use aggregator::{NotificationAggregator, ReadyBatch, RecordOutcome};
pub use formatter::NotificationFormatter;
pub use rules::{Route, RoleRouter};
pub use store::{NotificationEvent, NotificationStore};
