//! Output tree construction

pub mod builder;

pub use builder::{build_tree, parse_hours, TreeBuilder};
