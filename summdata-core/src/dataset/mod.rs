//! Paired summarization datasets
//!
//! [`SummarizationDataset`] materializes both corpora and supports random
//! access; [`IterableSummarizationDataset`] streams them line by line.

pub mod lines;
mod materialized;
mod streaming;

pub use lines::{read_lines, LineReader};
pub use materialized::{Example, SummarizationDataset, SummarizationDatasetBuilder};
pub use streaming::{IterableSummarizationDataset, ProcessedLines, StreamingOptions};
