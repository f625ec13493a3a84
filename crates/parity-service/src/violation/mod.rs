//! Violation store, filter engine, summaries and mock data.

pub mod filter;
pub mod mock;
pub mod store;
pub mod summary;

pub use filter::{DateRange, FilterState, ReasonFilter, filter_violations};
pub use mock::MockViolationGenerator;
pub use store::ViolationStore;
pub use summary::ViolationSummary;
