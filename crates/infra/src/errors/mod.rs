//! Error conversion helpers for infrastructure code

pub mod conversions;

pub use conversions::{map_infra_error, InfraError};
