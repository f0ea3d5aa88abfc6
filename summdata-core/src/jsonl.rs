//! Line-delimited JSON records
//!
//! One JSON object per line, UTF-8: `{"src": ...}` or `{"src": ..., "tgt": ...}`.

use crate::error::{DatasetError, Result};
use crate::preprocess::Processed;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Borrowed record used when exporting
#[derive(Debug, Serialize)]
pub(crate) struct RecordRef<'a> {
    pub(crate) src: &'a Processed,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tgt: Option<&'a Processed>,
}

/// A record read back from a JSONL file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonlRecord {
    /// Processed source body
    pub src: serde_json::Value,
    /// Processed target body, when the dataset had a target corpus
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tgt: Option<serde_json::Value>,
}

/// Writes one JSON value per line
pub struct JsonlWriter<W: Write> {
    writer: W,
    records: usize,
}

impl JsonlWriter<BufWriter<File>> {
    /// Create (or truncate) `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|error| DatasetError::FileWrite {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlWriter<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, records: 0 }
    }

    /// Write one record followed by a newline
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and return the number of records written
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.records)
    }
}

/// Read every record of a JSONL file, skipping blank lines
pub fn read_jsonl(path: &Path) -> Result<Vec<JsonlRecord>> {
    let file = File::open(path).map_err(|error| DatasetError::FileRead {
        path: path.to_path_buf(),
        error,
    })?;

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|error| DatasetError::FileRead {
            path: path.to_path_buf(),
            error,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record: JsonlRecord =
            serde_json::from_str(&line).map_err(|error| DatasetError::InvalidRecord {
                line: index + 1,
                error,
            })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextValue;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_record_without_target_omits_tgt() {
        let src = Processed::Plain(TextValue::from("a"));
        let line = serde_json::to_string(&RecordRef {
            src: &src,
            tgt: None,
        })
        .unwrap();
        assert_eq!(line, r#"{"src":"a"}"#);
    }

    #[test]
    fn test_writer_emits_one_line_per_record() {
        let mut writer = JsonlWriter::new(Vec::new());
        writer.write(&json!({"src": "x"})).unwrap();
        writer.write(&json!({"src": "y", "tgt": "z"})).unwrap();
        assert_eq!(writer.records(), 2);

        let JsonlWriter { writer: buffer, .. } = writer;
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "{\"src\":\"x\"}\n{\"src\":\"y\",\"tgt\":\"z\"}\n");
    }

    #[test]
    fn test_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.jsonl");
        std::fs::write(&path, "{\"src\":[\"a\"],\"tgt\":\"b\"}\n\n{\"src\":\"c\"}\n").unwrap();

        let records = read_jsonl(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].src, json!(["a"]));
        assert_eq!(records[0].tgt, Some(json!("b")));
        assert_eq!(records[1].tgt, None);
    }

    #[test]
    fn test_invalid_record_reports_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.jsonl");
        std::fs::write(&path, "{\"src\":\"ok\"}\nnot json\n").unwrap();

        match read_jsonl(&path) {
            Err(DatasetError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected invalid record, got {other:?}"),
        }
    }
}
