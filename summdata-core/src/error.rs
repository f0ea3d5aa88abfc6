//! Error types for dataset construction and preprocessing

use std::path::PathBuf;
use thiserror::Error;

/// Failure raised by a transform or tokenizer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{name}` failed: {reason}")]
pub struct TransformError {
    /// Name of the failing transform or tokenizer
    pub name: String,
    /// Human-readable reason
    pub reason: String,
}

impl TransformError {
    /// Create a new transform error
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while building or exporting a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Source and target corpora do not have the same number of lines
    #[error("source has {source_lines} lines but target has {target_lines}")]
    CorpusLengthMismatch {
        /// Number of source lines
        source_lines: usize,
        /// Number of target lines
        target_lines: usize,
    },

    /// A transform or tokenizer failed
    #[error("preprocessing failed: {0}")]
    Transform(#[from] TransformError),

    /// The worker pool could not be created
    #[error("worker pool error: {0}")]
    WorkerPool(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Transform or tokenizer name not found in the registry
    #[error("unknown {kind} `{name}`")]
    UnknownName {
        /// What was looked up ("transform" or "tokenizer")
        kind: &'static str,
        /// The name that was not found
        name: String,
    },

    /// Failed to read a corpus or record file
    #[error("failed to read {}: {error}", path.display())]
    FileRead {
        /// The file being read
        path: PathBuf,
        /// The underlying I/O error
        error: std::io::Error,
    },

    /// Failed to write an export file
    #[error("failed to write {}: {error}", path.display())]
    FileWrite {
        /// The file being written
        path: PathBuf,
        /// The underlying I/O error
        error: std::io::Error,
    },

    /// Malformed JSON record
    #[error("invalid record at line {line}: {error}")]
    InvalidRecord {
        /// 1-based line number
        line: usize,
        /// The underlying JSON error
        error: serde_json::Error,
    },

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error on an already opened stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DatasetError>;
