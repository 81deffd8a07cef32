//! Filesystem implementations of the conversion ports
//!
//! - [`FsSourceReader`] reads whole source files as UTF-8 text
//! - [`JsonTreeWriter`] writes the location tree as JSON
//! - [`CsvRecordWriter`] writes the flat reduced-record export

pub mod record_writer;
pub mod source_reader;
pub mod tree_writer;

use std::io;
use std::path::Path;

use sitecode_domain::{Result, SiteCodeError};

use crate::errors::map_infra_error;

pub use record_writer::CsvRecordWriter;
pub use source_reader::FsSourceReader;
pub use tree_writer::JsonTreeWriter;

/// Create the parent directory of `path` if it has one
pub(crate) async fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(dir).await.map_err(|e| io_error_at(dir, e))
        }
        _ => Ok(()),
    }
}

/// Map an I/O error, keeping the offending path in the message
pub(crate) fn io_error_at(path: &Path, err: io::Error) -> SiteCodeError {
    map_infra_error(io::Error::new(err.kind(), format!("{}: {err}", path.display())))
}
