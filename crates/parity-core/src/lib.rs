//! # parity-core
//!
//! Core crate for the rate parity dashboard. Contains configuration
//! schemas, typed identifiers, pagination types, the clock abstraction
//! used by time-windowed components, and the unified error system.
//!
//! This crate has **no** internal dependencies on other parity crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
