//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_MAX_CONCURRENT_FILES};
use crate::errors::{Result, SiteCodeError};
use crate::types::ReferenceTables;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Replacement reference tables; the standard tables when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<ReferenceTables>,
    pub output: OutputConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

/// Output file configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated files; next to each input when absent
    pub directory: Option<PathBuf>,
    /// Also write the reduced records as `<stem>_new.csv`
    pub write_flat_csv: bool,
    pub pretty_json: bool,
}

/// Batch execution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub max_concurrent_files: usize,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { directory: None, write_flat_csv: true, pretty_json: true }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: DEFAULT_LOG_LEVEL.to_string(), json: false }
    }
}

impl Config {
    /// Reference tables in effect
    pub fn effective_tables(&self) -> ReferenceTables {
        self.tables.clone().unwrap_or_default()
    }

    /// # Errors
    /// Returns `SiteCodeError::Config` if the concurrency limit is zero or
    /// custom reference tables are malformed.
    pub fn validate(&self) -> Result<()> {
        if self.batch.max_concurrent_files == 0 {
            return Err(SiteCodeError::Config(
                "batch.max_concurrent_files must be at least 1".to_string(),
            ));
        }
        if let Some(tables) = &self.tables {
            tables.validate()?;
        }
        Ok(())
    }
}
