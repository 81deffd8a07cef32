//! Domain types and models

pub mod batch;
pub mod record;
pub mod reference;
pub mod tree;

pub use batch::{BatchReport, ConversionSummary, FileOutcome, OutputPaths};
pub use record::{ClassifiedRecord, LocationKey, MalformedReason, SkippedRow};
pub use reference::{CodeCollision, LocationLevel, ReferenceEntry, ReferenceTables};
pub use tree::{count_work_items, TreeChild, TreeNode, WorkItem};
