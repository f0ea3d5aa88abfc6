//! Output destinations for exported records

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use summdata_core::{JsonlWriter, Processed};

/// One exported example, shaped like the records `save_to_jsonl` writes
#[derive(Debug, Serialize)]
pub struct ExportRecord<'a> {
    /// Processed source
    pub src: &'a Processed,
    /// Processed target, omitted without a target corpus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tgt: Option<&'a Processed>,
}

/// Open a JSONL writer on `path`, or on stdout when no path is given
pub fn open_jsonl(path: Option<&Path>) -> Result<JsonlWriter<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    Ok(JsonlWriter::new(writer))
}
