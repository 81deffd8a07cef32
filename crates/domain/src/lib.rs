//! # SiteCode Domain
//!
//! Domain types for converting construction task codes into location trees.
//!
//! This crate contains:
//! - Reference tables (buildings, floors, areas) and the standard data set
//! - Classified records, grouping keys and parse diagnostics
//! - Output tree types and batch outcome types
//! - Configuration structures
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other SiteCode crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
