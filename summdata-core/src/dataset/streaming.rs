//! Lazily read, single-pass paired dataset

use super::lines::LineReader;
use crate::error::Result;
use crate::preprocess::{Preprocessor, Processed};
use crate::text::{Tokenizer, TransformChain};
use std::fs::File;
use std::io::BufReader;
use std::iter::{FusedIterator, Take};
use std::path::Path;
use std::sync::Arc;

/// Preprocessing settings for a streaming dataset
#[derive(Clone, Default)]
pub struct StreamingOptions {
    source_chain: TransformChain,
    target_chain: TransformChain,
    tokenizer: Option<Arc<dyn Tokenizer>>,
    top_n: Option<usize>,
}

impl StreamingOptions {
    /// Options with empty chains, no tokenizer and no line limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Transforms applied to source lines
    pub fn source_chain(mut self, chain: TransformChain) -> Self {
        self.source_chain = chain;
        self
    }

    /// Transforms applied to target lines
    pub fn target_chain(mut self, chain: TransformChain) -> Self {
        self.target_chain = chain;
        self
    }

    /// Tokenizer applied to both corpora after their chains
    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Read at most `top_n` lines from each file
    pub fn top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Lazily preprocessed lines of one corpus file.
///
/// Each call to `next` reads and preprocesses exactly one line. The sequence
/// ends for good at end of file or after the first error.
pub struct ProcessedLines {
    lines: Take<LineReader<BufReader<File>>>,
    preprocessor: Preprocessor,
    finished: bool,
}

impl ProcessedLines {
    fn open(path: &Path, preprocessor: Preprocessor, top_n: Option<usize>) -> Result<Self> {
        let lines = LineReader::open(path)?.take(top_n.unwrap_or(usize::MAX));
        Ok(Self {
            lines,
            preprocessor,
            finished: false,
        })
    }
}

impl Iterator for ProcessedLines {
    type Item = Result<Processed>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = match self.lines.next() {
            None => None,
            Some(line) => Some(line.and_then(|line| self.preprocessor.process(line))),
        };

        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

impl FusedIterator for ProcessedLines {}

/// A summarization dataset read one line at a time.
///
/// Iterating the dataset yields processed source items in file order,
/// once; a new instance is needed to read the files again. Source and
/// target are independent: nothing checks that they have the same number
/// of lines and empty results are not filtered.
pub struct IterableSummarizationDataset {
    source: ProcessedLines,
    target: Option<ProcessedLines>,
}

impl IterableSummarizationDataset {
    /// Open `source_file` (and `target_file`, if any) for streaming
    pub fn new(
        source_file: impl AsRef<Path>,
        target_file: Option<&Path>,
        options: StreamingOptions,
    ) -> Result<Self> {
        let StreamingOptions {
            source_chain,
            target_chain,
            tokenizer,
            top_n,
        } = options;

        let source_preprocessor =
            Preprocessor::new(source_chain).with_tokenizer(tokenizer.clone());
        let source = ProcessedLines::open(source_file.as_ref(), source_preprocessor, top_n)?;

        let target = match target_file {
            Some(path) => {
                let target_preprocessor =
                    Preprocessor::new(target_chain).with_tokenizer(tokenizer);
                Some(ProcessedLines::open(path, target_preprocessor, top_n)?)
            }
            None => None,
        };

        tracing::debug!(
            source = %source_file.as_ref().display(),
            has_target = target.is_some(),
            ?top_n,
            "opened streaming dataset"
        );

        Ok(Self { source, target })
    }

    /// The lazy source sequence
    pub fn get_source(&mut self) -> &mut ProcessedLines {
        &mut self.source
    }

    /// The lazy target sequence, if a target file was given
    pub fn get_target(&mut self) -> Option<&mut ProcessedLines> {
        self.target.as_mut()
    }

    /// Split into independently owned source and target sequences
    pub fn into_parts(self) -> (ProcessedLines, Option<ProcessedLines>) {
        (self.source, self.target)
    }
}

impl Iterator for IterableSummarizationDataset {
    type Item = Result<Processed>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.next()
    }
}

impl FusedIterator for IterableSummarizationDataset {}
