//! Batch runner: one task per input file, bounded by a semaphore.
//!
//! Each task acquires a permit, drives the shared [`ConversionService`] for
//! its file and sends the outcome to a collector over an `mpsc` channel. The
//! collector places outcomes back in input order. A task that panics is
//! reported as a `BatchFailure` for its file; other files are unaffected.
//!
//! Before any task starts, each input's output paths are checked against the
//! inputs and against earlier inputs' outputs. A file that would overwrite
//! an input or another file's output fails with `InvalidInput` and is not
//! converted.
//!
//! Cancellation is cooperative: files that have not started when the token
//! fires are reported as `Cancelled`, files already converting run to
//! completion.

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use sitecode_core::{ConversionPipeline, ConversionService};
use sitecode_domain::{BatchReport, Config, FileOutcome, SiteCodeError};
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::errors::map_infra_error;
use crate::files::{CsvRecordWriter, FsSourceReader, JsonTreeWriter};

/// Runs a conversion service over a list of files
pub struct BatchRunner {
    service: Arc<ConversionService>,
    max_concurrent_files: usize,
    cancellation: CancellationToken,
}

impl BatchRunner {
    /// Create a runner; a concurrency limit of zero is raised to one.
    pub fn new(service: Arc<ConversionService>, max_concurrent_files: usize) -> Self {
        Self {
            service,
            max_concurrent_files: max_concurrent_files.max(1),
            cancellation: CancellationToken::new(),
        }
    }

    /// Wire the filesystem adapters and pipeline described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let pipeline = Arc::new(ConversionPipeline::new(config.effective_tables()));
        let mut service = ConversionService::new(
            pipeline,
            Arc::new(FsSourceReader::new()),
            Arc::new(JsonTreeWriter::new(config.output.pretty_json)),
        );
        if config.output.write_flat_csv {
            service = service.with_record_writer(Arc::new(CsvRecordWriter::new()));
        }
        if let Some(dir) = &config.output.directory {
            service = service.with_output_dir(dir.clone());
        }

        Self::new(Arc::new(service), config.batch.max_concurrent_files)
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Token that cancels files not yet started.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn max_concurrent_files(&self) -> usize {
        self.max_concurrent_files
    }

    /// Per input, the collision that prevents converting it, if any
    ///
    /// Earlier inputs keep their outputs; a later input claiming the same
    /// output path (a repeated input included) is rejected. Inputs whose
    /// paths cannot produce outputs are left for the conversion to report.
    fn output_conflicts(&self, inputs: &[PathBuf]) -> Vec<Option<SiteCodeError>> {
        let sources: HashSet<PathBuf> = inputs.iter().map(|p| normalize(p)).collect();
        let mut claimed: HashMap<PathBuf, usize> = HashMap::new();

        inputs
            .iter()
            .enumerate()
            .map(|(index, input)| {
                let outputs = self.service.outputs_for(input).ok()?;
                let targets: Vec<PathBuf> = std::iter::once(&outputs.json)
                    .chain(outputs.flat_csv.as_ref())
                    .map(|p| normalize(p))
                    .collect();

                if let Some(target) = targets.iter().find(|t| sources.contains(*t)) {
                    return Some(SiteCodeError::InvalidInput(format!(
                        "output {} would overwrite an input file",
                        target.display()
                    )));
                }
                if let Some((target, earlier)) =
                    targets.iter().find_map(|t| claimed.get(t).map(|earlier| (t, *earlier)))
                {
                    return Some(SiteCodeError::InvalidInput(format!(
                        "output {} is already written for {}",
                        target.display(),
                        inputs[earlier].display()
                    )));
                }

                for target in targets {
                    claimed.insert(target, index);
                }
                None
            })
            .collect()
    }

    /// Convert every input and report outcomes in input order.
    ///
    /// Never fails as a whole: per-file errors are carried in the report.
    pub async fn run(&self, inputs: &[PathBuf]) -> BatchReport {
        let total = inputs.len();
        info!(files = total, max_concurrent = self.max_concurrent_files, "batch started");

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_files));
        let (tx, mut rx) = mpsc::channel::<(usize, FileOutcome)>(total.max(1));
        let mut handles = Vec::with_capacity(total);
        let mut slots: Vec<Option<FileOutcome>> = vec![None; total];

        let conflicts = self.output_conflicts(inputs);
        for (index, input) in inputs.iter().cloned().enumerate() {
            if let Some(error) = &conflicts[index] {
                error!(path = %input.display(), error = %error, "output path collision");
                slots[index] = Some(FileOutcome::Failed { input, error: error.clone() });
                continue;
            }

            let service = Arc::clone(&self.service);
            let semaphore = Arc::clone(&semaphore);
            let token = self.cancellation.clone();
            let tx = tx.clone();
            let span = info_span!("convert", index, path = %input.display());

            let handle = tokio::spawn(
                async move {
                    let outcome = convert_one(&service, &semaphore, &token, input).await;
                    if tx.send((index, outcome)).await.is_err() {
                        warn!("batch collector closed before outcome was delivered");
                    }
                }
                .instrument(span),
            );
            handles.push((index, handle));
        }
        drop(tx);

        while let Some((index, outcome)) = rx.recv().await {
            slots[index] = Some(outcome);
        }

        // Tasks that died without reporting are panics or aborts
        for (index, handle) in handles {
            if let Err(err) = handle.await {
                if slots[index].is_none() {
                    let error = map_infra_error(err);
                    error!(
                        path = %inputs[index].display(),
                        error = %error,
                        "conversion task failed"
                    );
                    let input = inputs[index].clone();
                    slots[index] = Some(FileOutcome::Failed { input, error });
                }
            }
        }

        let outcomes: Vec<FileOutcome> = slots
            .into_iter()
            .zip(inputs)
            .map(|(slot, input)| {
                slot.unwrap_or_else(|| FileOutcome::Failed {
                    input: input.clone(),
                    error: SiteCodeError::Internal("no outcome reported".to_string()),
                })
            })
            .collect();

        let report = BatchReport { outcomes };
        info!(
            files = total,
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch finished"
        );
        report
    }
}

/// Lexical form used to compare paths: `.` components dropped
fn normalize(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

async fn convert_one(
    service: &ConversionService,
    semaphore: &Arc<Semaphore>,
    token: &CancellationToken,
    input: PathBuf,
) -> FileOutcome {
    let permit = tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("cancelled before start");
            return FileOutcome::Failed {
                input,
                error: SiteCodeError::Cancelled("batch cancelled before file started".to_string()),
            };
        }
        permit = Arc::clone(semaphore).acquire_owned() => permit,
    };
    let _permit = match permit {
        Ok(permit) => permit,
        Err(_) => {
            return FileOutcome::Failed {
                input,
                error: SiteCodeError::Internal("batch semaphore closed".to_string()),
            };
        }
    };

    match service.convert_file(&input).await {
        Ok((outputs, summary)) => FileOutcome::Converted { input, outputs, summary },
        Err(error) => {
            error!(error_kind = error.label(), error = %error, "conversion failed");
            FileOutcome::Failed { input, error }
        }
    }
}
