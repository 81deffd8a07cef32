//! `sitecode` command-line entry point.
//!
//! Result lines go to stdout; logs go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod report;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sitecode_infra::{config, init_logging, BatchRunner};
use tracing::warn;

use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("sitecode: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every input converted.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = config::load(cli.config.clone()).context("loading configuration")?;
    cli.apply(&mut config);
    config.validate().context("validating configuration")?;

    init_logging(&config.logging).context("initialising logging")?;

    if cli.print_tables {
        let tables = serde_json::to_string_pretty(&config.effective_tables())?;
        println!("{tables}");
        return Ok(true);
    }

    let runner = BatchRunner::from_config(&config);
    let token = runner.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling files not yet started");
            token.cancel();
        }
    });

    let report = runner.run(&cli.files).await;
    for line in report::render(&report) {
        println!("{line}");
    }

    Ok(report.is_success())
}
