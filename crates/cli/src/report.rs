//! One-line-per-file result table

use sitecode_domain::{BatchReport, FileOutcome};

/// Render one line for a file outcome.
pub fn outcome_line(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Converted { input, outputs, summary } => {
            let mut line = format!(
                "ok      {} -> {} ({} records, {} skipped, {} unclassified)",
                input.display(),
                outputs.json.display(),
                summary.records,
                summary.skipped,
                summary.unclassified,
            );
            if let Some(csv) = &outputs.flat_csv {
                line.push_str(&format!(" +{}", csv.display()));
            }
            line
        }
        FileOutcome::Failed { input, error } => {
            format!("failed  {}: {}", input.display(), error)
        }
    }
}

/// Render the whole report, one line per input in input order.
pub fn render(report: &BatchReport) -> Vec<String> {
    report.outcomes.iter().map(outcome_line).collect()
}
