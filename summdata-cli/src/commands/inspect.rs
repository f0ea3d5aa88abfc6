//! Inspect command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use summdata_core::{read_jsonl, JsonlRecord};

/// Arguments for the inspect command
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// JSONL file written by `build` or `stream`
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of an exported dataset
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records
    pub records: usize,
    /// Records carrying a `tgt` field
    pub with_target: usize,
    /// Records whose source is a list of token lists
    pub tokenized: usize,
}

impl Summary {
    fn from_records(records: &[JsonlRecord]) -> Self {
        let mut summary = Summary {
            records: records.len(),
            ..Summary::default()
        };
        for record in records {
            if record.tgt.is_some() {
                summary.with_target += 1;
            }
            if is_tokenized(&record.src) {
                summary.tokenized += 1;
            }
        }
        summary
    }
}

/// Tokenized bodies are arrays whose elements are arrays
fn is_tokenized(value: &serde_json::Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().any(serde_json::Value::is_array))
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> Result<()> {
        let records = read_jsonl(&self.input)
            .with_context(|| format!("Failed to inspect {}", self.input.display()))?;
        let summary = Summary::from_records(&records);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("File: {}", self.input.display());
            println!("  Records:     {}", summary.records);
            println!("  With target: {}", summary.with_target);
            println!("  Tokenized:   {}", summary.tokenized);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(src: serde_json::Value, tgt: Option<serde_json::Value>) -> JsonlRecord {
        JsonlRecord { src, tgt }
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            record(json!("plain"), None),
            record(json!([["a", "b"]]), Some(json!([["c"]]))),
            record(json!(["one sentence", "two"]), Some(json!("t"))),
        ];

        assert_eq!(
            Summary::from_records(&records),
            Summary {
                records: 3,
                with_target: 2,
                tokenized: 1,
            }
        );
    }

    #[test]
    fn test_empty_file_summary() {
        assert_eq!(Summary::from_records(&[]), Summary::default());
    }
}
