//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use sitecode_domain::Config;

/// Convert construction task-code CSV files into location trees.
///
/// For each input `<dir>/<stem>.<ext>` writes `<stem>.json` and, unless
/// disabled, `<stem>_new.csv` next to the input or into `--output-dir`.
#[derive(Debug, Parser)]
#[command(name = "sitecode", version)]
pub struct Cli {
    /// Configuration file (.toml or .json); standard locations are probed otherwise
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for generated files
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip the flat `<stem>_new.csv` export
    #[arg(long)]
    pub no_csv: bool,

    /// Files converted concurrently
    #[arg(short, long, value_name = "N", value_parser = parse_jobs)]
    pub jobs: Option<usize>,

    /// Write JSON without indentation
    #[arg(long)]
    pub compact: bool,

    /// Print the effective reference tables as JSON and exit
    #[arg(long)]
    pub print_tables: bool,

    /// Input CSV files
    #[arg(value_name = "FILES", required_unless_present = "print_tables")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.output.directory = Some(dir.clone());
        }
        if self.no_csv {
            config.output.write_flat_csv = false;
        }
        if let Some(jobs) = self.jobs {
            config.batch.max_concurrent_files = jobs;
        }
        if self.compact {
            config.output.pretty_json = false;
        }
    }
}

fn parse_jobs(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
