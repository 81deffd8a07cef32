//! Concurrent conversion of many input files

pub mod runner;

pub use runner::BatchRunner;
