//! Code classification: raw lines to classified records

pub mod classifier;

pub use classifier::{CodeClassifier, ParseOutput};
