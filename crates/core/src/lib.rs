//! Domain logic for the lostflight disc registry.
//!
//! This crate has zero internal dependencies so it can be used by the store
//! layer, the API layer, and any future CLI or worker tooling. Everything
//! here is pure: no I/O, no async, no shared state.

pub mod disc;
pub mod search;
pub mod types;
