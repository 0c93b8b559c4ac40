//! Synthetic spatial datasets for exercising a KD-tree workload.
mod generator;
mod options;
mod reader;
mod sink;

pub use generator::{RowSampler, generate, generate_with};
pub use options::{DEFAULT_COLS, DEFAULT_FILENAME, DEFAULT_ROWS, DEFAULT_VALUE_BASE, GeneratorConfig, VALUE_SPAN};
pub use reader::{DatasetShape, read_dataset};
pub use sink::{RowSink, TsvSink};
