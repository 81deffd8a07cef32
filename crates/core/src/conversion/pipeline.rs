//! Conversion pipeline - parse, group, reduce, build
//!
//! Pure and synchronous: a source text goes in, reduced records plus the
//! location tree come out. Diagnostics are emitted through `tracing` only.

use sitecode_domain::{count_work_items, ClassifiedRecord, ConversionSummary, ReferenceTables};
use sitecode_domain::{Result, SkippedRow, TreeNode};
use tracing::debug;

use crate::classification::CodeClassifier;
use crate::grouping::{flatten_groups, group_records, reduce_groups};
use crate::tree::build_tree;

/// Everything produced from one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Reduced records in grouped order
    pub records: Vec<ClassifiedRecord>,
    pub tree: Vec<TreeNode>,
    pub skipped: Vec<SkippedRow>,
    pub summary: ConversionSummary,
}

/// The four-stage pipeline bound to one set of reference tables
#[derive(Debug, Clone)]
pub struct ConversionPipeline {
    classifier: CodeClassifier,
}

impl ConversionPipeline {
    pub fn new(tables: ReferenceTables) -> Self {
        Self { classifier: CodeClassifier::new(tables) }
    }

    pub fn classifier(&self) -> &CodeClassifier {
        &self.classifier
    }

    /// Run every stage over a source text
    ///
    /// # Errors
    /// Returns `SiteCodeError::InvalidInput` if a located record carries a
    /// non-integer hour field; the whole text is rejected in that case.
    pub fn run(&self, text: &str) -> Result<Conversion> {
        let parsed = self.classifier.parse(text);
        let unclassified = parsed.records.iter().filter(|r| r.is_unclassified()).count();
        let record_count = parsed.records.len();

        let mut groups = group_records(parsed.records);
        reduce_groups(&mut groups);
        let group_count = groups.len();
        let records = flatten_groups(groups);

        for record in &records {
            debug!(
                building = %record.location.building,
                floor = %record.location.floor,
                area = %record.location.area,
                hour = %record.hour,
                full_code = %record.full_code,
                label = %record.label,
                "reduced record"
            );
        }

        let tree = build_tree(&records)?;

        let summary = ConversionSummary {
            lines: parsed.lines,
            records: record_count,
            skipped: parsed.skipped.len(),
            unclassified,
            groups: group_count,
            top_level_nodes: tree.len(),
            work_items: count_work_items(&tree),
        };

        Ok(Conversion { records, tree, skipped: parsed.skipped, summary })
    }
}

impl Default for ConversionPipeline {
    fn default() -> Self {
        Self::new(ReferenceTables::standard())
    }
}
