//! Violation domain entities.

pub mod classification;
pub mod model;
pub mod severity;

pub use classification::{ChannelKind, ParityOutcome, RateAvailability};
pub use model::{ShopDetails, Violation, ViolationPatch};
pub use severity::Severity;
