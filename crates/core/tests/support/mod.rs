//! Shared test helpers for `sitecode-core` integration tests.
//!
//! In-memory implementations of the conversion ports so service tests can
//! focus on behaviour instead of filesystem plumbing.

pub mod ports;
