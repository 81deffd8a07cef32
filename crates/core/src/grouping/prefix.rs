//! Prefix reducer - strips the token prefix every label in a group shares
//!
//! Labels are split on whitespace. Within a group of two or more records the
//! longest common leading run of tokens is removed and the rest is rejoined
//! with single spaces. A single-record group keeps all its tokens (but is
//! still whitespace-normalised). Identical labels reduce to empty strings.

use super::grouper::RecordGroup;

/// Number of leading tokens shared by every sequence
///
/// Zero for fewer than two sequences. A sequence shorter than the running
/// prefix stops the scan at its own length.
pub fn common_prefix_len<S: AsRef<str>>(sequences: &[Vec<S>]) -> usize {
    let [first, rest @ ..] = sequences else {
        return 0;
    };
    if rest.is_empty() {
        return 0;
    }

    let limit = sequences.iter().map(Vec::len).min().unwrap_or(0);
    (0..limit)
        .take_while(|&i| rest.iter().all(|seq| seq[i].as_ref() == first[i].as_ref()))
        .count()
}

/// Reduce a set of labels that belong to one group
pub fn reduce_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let sequences: Vec<Vec<&str>> =
        labels.iter().map(|label| label.as_ref().split_whitespace().collect()).collect();
    let prefix = common_prefix_len(&sequences);

    sequences.iter().map(|tokens| tokens[prefix..].join(" ")).collect()
}

/// Rewrite every record label of a group in place
pub fn reduce_group(group: &mut RecordGroup) {
    let labels: Vec<&str> = group.records.iter().map(|r| r.label.as_str()).collect();
    let reduced = reduce_labels(&labels);

    for (record, label) in group.records.iter_mut().zip(reduced) {
        record.label = label;
    }
}

pub fn reduce_groups(groups: &mut [RecordGroup]) {
    groups.iter_mut().for_each(reduce_group);
}
