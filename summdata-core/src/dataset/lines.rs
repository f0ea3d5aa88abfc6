//! Line reading for corpus files
//!
//! Lines keep their terminator: stripping newlines is the job of the
//! transform chain, not of the reader.

use crate::error::{DatasetError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

/// Reads a corpus one line at a time
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    path: PathBuf,
    done: bool,
}

impl LineReader<BufReader<File>> {
    /// Open `path` for line-by-line reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|error| DatasetError::FileRead {
            path: path.to_path_buf(),
            error,
        })?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineReader<R> {
    /// Wrap an existing reader; `path` is only used in error messages
    pub fn new(reader: R, path: &Path) -> Self {
        Self {
            reader,
            path: path.to_path_buf(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => Some(Ok(line)),
            Err(error) => {
                self.done = true;
                Some(Err(DatasetError::FileRead {
                    path: self.path.clone(),
                    error,
                }))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for LineReader<R> {}

/// Read up to `top_n` lines of `path` (all lines when `None`)
pub fn read_lines(path: &Path, top_n: Option<usize>) -> Result<Vec<String>> {
    LineReader::open(path)?
        .take(top_n.unwrap_or(usize::MAX))
        .collect()
}
