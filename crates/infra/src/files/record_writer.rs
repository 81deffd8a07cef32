//! Flat CSV export of reduced records

use std::path::Path;

use async_trait::async_trait;
use sitecode_core::RecordWriter;
use sitecode_domain::constants::FLAT_CSV_HEADER;
use sitecode_domain::{ClassifiedRecord, Result};
use tokio::task;
use tracing::debug;

use super::ensure_parent_dir;
use crate::errors::map_infra_error;

/// Writes one CSV row per reduced record under a fixed header
///
/// Columns: `build,floor,area,hour,full,label`. Fields containing commas or
/// quotes are quoted by the `csv` writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRecordWriter;

impl CsvRecordWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecordWriter for CsvRecordWriter {
    async fn write_records(&self, path: &Path, records: &[ClassifiedRecord]) -> Result<()> {
        ensure_parent_dir(path).await?;

        let target = path.to_path_buf();
        let rows = records.to_vec();
        let count = rows.len();

        task::spawn_blocking(move || write_csv(&target, &rows))
            .await
            .map_err(map_infra_error)??;

        debug!(path = %path.display(), rows = count, "flat records written");
        Ok(())
    }
}

fn write_csv(path: &Path, records: &[ClassifiedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(map_infra_error)?;
    writer.write_record(FLAT_CSV_HEADER).map_err(map_infra_error)?;

    for record in records {
        writer
            .write_record([
                record.location.building.as_str(),
                record.location.floor.as_str(),
                record.location.area.as_str(),
                record.hour.trim(),
                record.full_code.as_str(),
                record.label.as_str(),
            ])
            .map_err(map_infra_error)?;
    }

    writer.flush().map_err(map_infra_error)
}

#[cfg(test)]
mod tests {
    use sitecode_domain::LocationKey;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/log_new.csv");
        let records = vec![
            ClassifiedRecord::new(
                LocationKey::new("Building 1 North", "Floor 01", "Area A"),
                "8",
                "B1 F01 AA ",
                "Slab",
            ),
            ClassifiedRecord::new(LocationKey::default(), "", "ZZ ", "Unmapped, misc"),
        ];

        CsvRecordWriter::new().write_records(&path, &records).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "build,floor,area,hour,full,label");
        assert_eq!(lines[1], "Building 1 North,Floor 01,Area A,8,B1 F01 AA ,Slab");
        assert_eq!(lines[2], ",,,,ZZ ,\"Unmapped, misc\"");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_records_write_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty_new.csv");

        CsvRecordWriter::new().write_records(&path, &[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "build,floor,area,hour,full,label\n");
    }

    #[tokio::test]
    async fn test_carriage_return_is_trimmed_from_hour() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crlf_new.csv");
        let record =
            ClassifiedRecord::new(LocationKey::new("Building 0", "", ""), "8\r", "B0 ", "Survey");

        CsvRecordWriter::new().write_records(&path, &[record]).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().nth(1), Some("Building 0,,,8,B0 ,Survey"));
        assert!(!text.contains('\r'));
    }
}
