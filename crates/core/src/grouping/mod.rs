//! Grouping by location key and per-group label reduction

pub mod grouper;
pub mod prefix;

pub use grouper::{flatten_groups, group_records, RecordGroup};
pub use prefix::{common_prefix_len, reduce_group, reduce_groups, reduce_labels};
