//! Abstractions injected into time-dependent components.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
