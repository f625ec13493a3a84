//! # parity-entity
//!
//! Domain entity models for the rate parity dashboard. Every struct in
//! this crate is a plain value object deriving `Debug`, `Clone`,
//! `Serialize` and `Deserialize`.

pub mod notification;
pub mod user;
pub mod violation;
