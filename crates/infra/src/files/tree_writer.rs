//! JSON writer for the location tree

use std::path::Path;

use async_trait::async_trait;
use sitecode_core::TreeWriter;
use sitecode_domain::{Result, TreeNode};
use tracing::debug;

use super::{ensure_parent_dir, io_error_at};
use crate::errors::map_infra_error;

/// Writes the top-level node list as a JSON array
///
/// Pretty output uses two-space indentation.
#[derive(Debug, Clone, Copy)]
pub struct JsonTreeWriter {
    pretty: bool,
}

impl JsonTreeWriter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty() -> Self {
        Self::new(true)
    }

    pub fn compact() -> Self {
        Self::new(false)
    }

    fn encode(&self, tree: &[TreeNode]) -> Result<Vec<u8>> {
        let encoded =
            if self.pretty { serde_json::to_vec_pretty(tree) } else { serde_json::to_vec(tree) };
        encoded.map_err(map_infra_error)
    }
}

impl Default for JsonTreeWriter {
    fn default() -> Self {
        Self::pretty()
    }
}

#[async_trait]
impl TreeWriter for JsonTreeWriter {
    async fn write_tree(&self, path: &Path, tree: &[TreeNode]) -> Result<()> {
        let bytes = self.encode(tree)?;
        ensure_parent_dir(path).await?;
        tokio::fs::write(path, &bytes).await.map_err(|e| io_error_at(path, e))?;

        debug!(path = %path.display(), nodes = tree.len(), bytes = bytes.len(), "tree written");
        Ok(())
    }
}
