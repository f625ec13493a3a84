//! Core type definitions shared across the parity workspace.

pub mod id;
pub mod pagination;

pub use id::*;
pub use pagination::{PageRequest, PageResponse, paginate};
