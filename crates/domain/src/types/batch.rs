//! Per-file conversion summaries and batch outcomes

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::SiteCodeError;

/// Counters for one converted file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Lines read from the source
    pub lines: usize,
    /// Classified records produced
    pub records: usize,
    /// Malformed rows dropped (blank lines included)
    pub skipped: usize,
    /// Records that matched no reference table
    pub unclassified: usize,
    pub groups: usize,
    pub top_level_nodes: usize,
    pub work_items: usize,
}

/// Where a converted file's outputs were written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputPaths {
    pub json: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_csv: Option<PathBuf>,
}

/// Result of converting one file within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Converted { input: PathBuf, outputs: OutputPaths, summary: ConversionSummary },
    Failed { input: PathBuf, error: SiteCodeError },
}

impl FileOutcome {
    pub fn input(&self) -> &PathBuf {
        match self {
            Self::Converted { input, .. } | Self::Failed { input, .. } => input,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

/// Outcomes of one batch run, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Single aggregate signal: every file converted
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_success)
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
