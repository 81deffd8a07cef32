//! Conversion service - drives the pipeline for one file through the ports

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitecode_domain::constants::{FLAT_CSV_EXTENSION, FLAT_CSV_SUFFIX, JSON_EXTENSION};
use sitecode_domain::{ConversionSummary, OutputPaths, Result, SiteCodeError};
use tracing::info;

use super::pipeline::ConversionPipeline;
use super::ports::{RecordWriter, SourceReader, TreeWriter};

/// Derive output locations for an input file
///
/// `<dir>/<stem>.json` and, when requested, `<dir>/<stem>_new.csv`, where
/// `<dir>` is `output_dir` or the input's own directory.
///
/// # Errors
/// Returns `SiteCodeError::InvalidInput` if the input path has no file stem.
pub fn output_paths(
    input: &Path,
    output_dir: Option<&Path>,
    flat_csv: bool,
) -> Result<OutputPaths> {
    let stem = input.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
        SiteCodeError::InvalidInput(format!("input path has no file name: {}", input.display()))
    })?;

    let dir: PathBuf = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    Ok(OutputPaths {
        json: dir.join(format!("{stem}.{JSON_EXTENSION}")),
        flat_csv: flat_csv
            .then(|| dir.join(format!("{stem}{FLAT_CSV_SUFFIX}.{FLAT_CSV_EXTENSION}"))),
    })
}

/// Conversion service for turning task-code files into location trees
pub struct ConversionService {
    pipeline: Arc<ConversionPipeline>,
    reader: Arc<dyn SourceReader>,
    tree_writer: Arc<dyn TreeWriter>,
    record_writer: Option<Arc<dyn RecordWriter>>,
    output_dir: Option<PathBuf>,
}

impl ConversionService {
    /// Create a new conversion service
    ///
    /// Flat record output is disabled until [`Self::with_record_writer`] is
    /// called.
    pub fn new(
        pipeline: Arc<ConversionPipeline>,
        reader: Arc<dyn SourceReader>,
        tree_writer: Arc<dyn TreeWriter>,
    ) -> Self {
        Self { pipeline, reader, tree_writer, record_writer: None, output_dir: None }
    }

    pub fn with_record_writer(mut self, writer: Arc<dyn RecordWriter>) -> Self {
        self.record_writer = Some(writer);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn pipeline(&self) -> &ConversionPipeline {
        &self.pipeline
    }

    /// Paths [`Self::convert_file`] writes for `input`
    ///
    /// # Errors
    /// Returns `SiteCodeError::InvalidInput` if the input path has no file stem.
    pub fn outputs_for(&self, input: &Path) -> Result<OutputPaths> {
        output_paths(input, self.output_dir.as_deref(), self.record_writer.is_some())
    }

    /// Read, convert and write one file
    ///
    /// Nothing is written if reading or conversion fails.
    pub async fn convert_file(&self, input: &Path) -> Result<(OutputPaths, ConversionSummary)> {
        let outputs = self.outputs_for(input)?;

        let text = self.reader.read_source(input).await?;
        let conversion = self.pipeline.run(&text)?;

        if let (Some(writer), Some(path)) = (&self.record_writer, &outputs.flat_csv) {
            writer.write_records(path, &conversion.records).await?;
        }
        self.tree_writer.write_tree(&outputs.json, &conversion.tree).await?;

        let summary = conversion.summary;
        info!(
            path = %input.display(),
            output = %outputs.json.display(),
            lines = summary.lines,
            records = summary.records,
            skipped = summary.skipped,
            unclassified = summary.unclassified,
            groups = summary.groups,
            work_items = summary.work_items,
            "file converted"
        );

        Ok((outputs, summary))
    }
}
