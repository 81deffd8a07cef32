//! Port interfaces for reading sources and writing conversion outputs

use std::path::Path;

use async_trait::async_trait;
use sitecode_domain::{ClassifiedRecord, Result, TreeNode};

/// Trait for loading a source file into memory
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Read the whole source text at `path`
    async fn read_source(&self, path: &Path) -> Result<String>;
}

/// Trait for persisting the location tree
#[async_trait]
pub trait TreeWriter: Send + Sync {
    /// Write the top-level nodes to `path`
    async fn write_tree(&self, path: &Path, tree: &[TreeNode]) -> Result<()>;
}

/// Trait for persisting the flat list of reduced records
#[async_trait]
pub trait RecordWriter: Send + Sync {
    /// Write reduced records, in grouped order, to `path`
    async fn write_records(&self, path: &Path, records: &[ClassifiedRecord]) -> Result<()>;
}
