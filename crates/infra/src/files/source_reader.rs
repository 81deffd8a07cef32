//! Source reader backed by `tokio::fs`

use std::path::Path;

use async_trait::async_trait;
use sitecode_core::SourceReader;
use sitecode_domain::Result;
use tracing::debug;

use super::io_error_at;

/// Reads source files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceReader;

impl FsSourceReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SourceReader for FsSourceReader {
    async fn read_source(&self, path: &Path) -> Result<String> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| io_error_at(path, e))?;
        debug!(path = %path.display(), bytes = text.len(), "source read");
        Ok(text)
    }
}
