//! Acting user domain types.

pub mod role;

pub use role::Role;
