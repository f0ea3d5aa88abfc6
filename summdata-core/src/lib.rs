//! Dataset preparation for sequence-to-sequence summarization training
//!
//! This crate turns line-delimited corpora (source paragraphs and optional
//! target summaries) into preprocessed, optionally tokenized, paired examples.
//! Two access models share a single preprocessing primitive:
//!
//! - [`SummarizationDataset`]: loads both corpora eagerly, runs them through a
//!   scoped worker pool and exposes random access by index.
//! - [`IterableSummarizationDataset`]: reads one line at a time and
//!   preprocesses on demand, for corpora that should not be held in memory.
//!
//! # Example
//!
//! ```rust
//! use summdata_core::{SummarizationDataset, TextValue, TransformChain};
//!
//! let chain = TransformChain::new().map("strip", |value| match value {
//!     TextValue::Text(text) => TextValue::Text(text.trim().to_string()),
//!     other => other,
//! });
//!
//! let dataset = SummarizationDataset::builder()
//!     .source_lines(vec!["  A long paragraph.  ".to_string(), "   ".to_string()])
//!     .source_chain(chain)
//!     .build()
//!     .unwrap();
//!
//! // The blank line is filtered out after preprocessing
//! assert_eq!(dataset.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod jsonl;
pub mod parallel;
pub mod preprocess;
pub mod registry;
pub mod text;

// Re-export key types
pub use config::{DatasetConfig, DatasetConfigBuilder, FilterPolicy, WorkerCount};
pub use dataset::{
    Example, IterableSummarizationDataset, ProcessedLines, StreamingOptions,
    SummarizationDataset, SummarizationDatasetBuilder,
};
pub use error::{DatasetError, Result, TransformError};
pub use jsonl::{read_jsonl, JsonlRecord, JsonlWriter};
pub use parallel::parallel_preprocess;
pub use preprocess::{preprocess, Processed, Preprocessor};
pub use registry::TransformRegistry;
pub use text::{
    tokenizer_fn, TextValue, Tokenizer, Transform, TransformChain, WhitespaceTokenizer,
};
