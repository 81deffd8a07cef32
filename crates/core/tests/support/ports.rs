//! In-memory port implementations

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use sitecode_core::{RecordWriter, SourceReader, TreeWriter};
use sitecode_domain::{ClassifiedRecord, Result, SiteCodeError, TreeNode};

/// Serves source texts from a map keyed by path.
#[derive(Default)]
pub struct MemorySourceReader {
    sources: HashMap<PathBuf, String>,
}

impl MemorySourceReader {
    pub fn with_source(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.sources.insert(path.into(), text.into());
        self
    }
}

#[async_trait]
impl SourceReader for MemorySourceReader {
    async fn read_source(&self, path: &Path) -> Result<String> {
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| SiteCodeError::Io(format!("no such source: {}", path.display())))
    }
}

/// Records every tree written, keyed by output path.
#[derive(Default)]
pub struct RecordingTreeWriter {
    pub written: Mutex<Vec<(PathBuf, Vec<TreeNode>)>>,
}

#[async_trait]
impl TreeWriter for RecordingTreeWriter {
    async fn write_tree(&self, path: &Path, tree: &[TreeNode]) -> Result<()> {
        self.written.lock().unwrap().push((path.to_path_buf(), tree.to_vec()));
        Ok(())
    }
}

/// Records every flat record list written.
#[derive(Default)]
pub struct RecordingRecordWriter {
    pub written: Mutex<Vec<(PathBuf, Vec<ClassifiedRecord>)>>,
}

#[async_trait]
impl RecordWriter for RecordingRecordWriter {
    async fn write_records(&self, path: &Path, records: &[ClassifiedRecord]) -> Result<()> {
        self.written.lock().unwrap().push((path.to_path_buf(), records.to_vec()));
        Ok(())
    }
}

/// Tree writer that always fails.
pub struct FailingTreeWriter;

#[async_trait]
impl TreeWriter for FailingTreeWriter {
    async fn write_tree(&self, path: &Path, _tree: &[TreeNode]) -> Result<()> {
        Err(SiteCodeError::Io(format!("disk full writing {}", path.display())))
    }
}
