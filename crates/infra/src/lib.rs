//! # SiteCode Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Filesystem source reader and JSON/CSV output writers
//! - Configuration loading (files and environment overrides)
//! - The concurrent batch runner
//! - Logging setup
//!
//! ## Architecture
//! - Implements traits defined in `sitecode-core`
//! - Contains all "impure" code (filesystem, runtime, global logger)

pub mod batch;
pub mod config;
pub mod errors;
pub mod files;
pub mod observability;

// Re-export commonly used items
pub use batch::BatchRunner;
pub use errors::{map_infra_error, InfraError};
pub use files::{CsvRecordWriter, FsSourceReader, JsonTreeWriter};
pub use observability::init_logging;
