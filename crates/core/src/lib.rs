//! # SiteCode Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Code classification against building/floor/area reference tables
//! - Grouping by location and per-group label prefix reduction
//! - Location tree construction
//! - Port interfaces (traits) for source reading and output writing
//! - The conversion service driving one file through the pipeline
//!
//! ## Architecture Principles
//! - Only depends on `sitecode-domain`
//! - No filesystem or runtime code
//! - All external I/O via traits
//! - Pure, testable business logic

pub mod classification;
pub mod conversion;
pub mod grouping;
pub mod tree;

// Re-export specific items to avoid ambiguity
pub use classification::{CodeClassifier, ParseOutput};
pub use conversion::{
    output_paths, Conversion, ConversionPipeline, ConversionService, RecordWriter, SourceReader,
    TreeWriter,
};
pub use grouping::{group_records, reduce_groups, RecordGroup};
pub use tree::{build_tree, TreeBuilder};
