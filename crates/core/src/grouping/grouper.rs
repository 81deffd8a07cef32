//! Grouper - partitions classified records by location key
//!
//! Records are stable-sorted by `(building, floor, area)` and split into
//! maximal runs sharing a key. Relative input order survives inside each
//! run.

use serde::Serialize;
use sitecode_domain::{ClassifiedRecord, LocationKey};

/// All records sharing one location key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordGroup {
    pub key: LocationKey,
    pub records: Vec<ClassifiedRecord>,
}

impl RecordGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Sort and partition records into groups in key order
pub fn group_records(mut records: Vec<ClassifiedRecord>) -> Vec<RecordGroup> {
    // `sort_by` is stable
    records.sort_by(|a, b| a.location.cmp(&b.location));

    let mut groups: Vec<RecordGroup> = Vec::new();
    for record in records {
        match groups.last_mut() {
            Some(group) if group.key == record.location => group.records.push(record),
            _ => groups.push(RecordGroup { key: record.location.clone(), records: vec![record] }),
        }
    }

    groups
}

/// Concatenate groups back into one record list, in group order
pub fn flatten_groups(groups: Vec<RecordGroup>) -> Vec<ClassifiedRecord> {
    groups.into_iter().flat_map(|group| group.records).collect()
}
