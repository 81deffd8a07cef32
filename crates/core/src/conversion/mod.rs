//! File conversion: the pipeline, its I/O ports and the driving service

pub mod pipeline;
pub mod ports;
pub mod service;

pub use pipeline::{Conversion, ConversionPipeline};
pub use ports::{RecordWriter, SourceReader, TreeWriter};
pub use service::{output_paths, ConversionService};
