//! Eagerly loaded, randomly accessible paired dataset

use super::lines::read_lines;
use crate::config::{DatasetConfig, FilterPolicy, WorkerCount};
use crate::error::{DatasetError, Result};
use crate::jsonl::{JsonlWriter, RecordRef};
use crate::parallel::parallel_preprocess;
use crate::preprocess::{Preprocessor, Processed};
use crate::text::{Tokenizer, TransformChain};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One indexed example
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Example<'a> {
    /// Processed source
    pub src: &'a Processed,
    /// Raw source line
    pub src_txt: &'a str,
    /// Processed target (None without a target corpus)
    pub tgt: Option<&'a Processed>,
    /// Raw target line (None without a target corpus)
    pub tgt_txt: Option<&'a str>,
}

/// Raw lines and their processed results, kept index-aligned
#[derive(Debug, Clone, Default)]
struct Corpus {
    raw: Vec<String>,
    processed: Vec<Processed>,
}

impl Corpus {
    /// Keep the entries whose `keep` flag is set
    fn retain(raw: Vec<String>, processed: Vec<Processed>, keep: &[bool]) -> Self {
        let (raw, processed) = raw
            .into_iter()
            .zip(processed)
            .zip(keep)
            .filter(|(_, keep)| **keep)
            .map(|(pair, _)| pair)
            .unzip();
        Self { raw, processed }
    }

    fn len(&self) -> usize {
        self.processed.len()
    }

    fn truncate(&mut self, len: usize) {
        self.raw.truncate(len);
        self.processed.truncate(len);
    }
}

/// A summarization dataset held entirely in memory.
///
/// Both corpora are preprocessed in parallel at construction; examples
/// whose processed text is empty are dropped according to the configured
/// [`FilterPolicy`].
#[derive(Debug, Clone)]
pub struct SummarizationDataset {
    source: Corpus,
    target: Option<Corpus>,
}

impl SummarizationDataset {
    /// Create a dataset builder
    pub fn builder() -> SummarizationDatasetBuilder {
        SummarizationDatasetBuilder::default()
    }

    /// Number of examples (processed source entries)
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Whether the dataset has no examples
    pub fn is_empty(&self) -> bool {
        self.source.processed.is_empty()
    }

    /// Whether a target corpus was supplied
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Example at `index`.
    ///
    /// Returns `None` when `index` is past the end of any present sequence;
    /// with per-corpus filtering the target can be shorter than the source.
    pub fn get(&self, index: usize) -> Option<Example<'_>> {
        let src = self.source.processed.get(index)?;
        let src_txt = self.source.raw.get(index)?;

        let (tgt, tgt_txt) = match &self.target {
            Some(target) => (
                Some(target.processed.get(index)?),
                Some(target.raw.get(index)?.as_str()),
            ),
            None => (None, None),
        };

        Some(Example {
            src,
            src_txt,
            tgt,
            tgt_txt,
        })
    }

    /// Iterate examples in index order
    pub fn iter(&self) -> impl Iterator<Item = Example<'_>> + '_ {
        (0..self.len()).map_while(move |index| self.get(index))
    }

    /// Processed source examples
    pub fn source(&self) -> &[Processed] {
        &self.source.processed
    }

    /// Raw source lines
    pub fn source_txt(&self) -> &[String] {
        &self.source.raw
    }

    /// Processed target examples
    pub fn target(&self) -> Option<&[Processed]> {
        self.target.as_ref().map(|t| t.processed.as_slice())
    }

    /// Raw target lines
    pub fn target_txt(&self) -> Option<&[String]> {
        self.target.as_ref().map(|t| t.raw.as_slice())
    }

    /// Keep only the first `top_n` examples.
    ///
    /// No-op when `top_n` is `None` or larger than the dataset.
    pub fn shorten(&mut self, top_n: Option<usize>) -> &mut Self {
        match top_n {
            Some(n) if n <= self.len() => {
                self.source.truncate(n);
                if let Some(target) = &mut self.target {
                    target.truncate(n);
                }
            }
            _ => {}
        }
        self
    }

    /// Write processed examples to `path` as JSON Lines.
    ///
    /// Records pair source and target by index; when the target is shorter
    /// the export stops at its end. Returns the number of records written.
    pub fn save_to_jsonl(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let mut writer = JsonlWriter::create(path)?;

        match &self.target {
            None => {
                for src in &self.source.processed {
                    writer.write(&RecordRef { src, tgt: None })?;
                }
            }
            Some(target) => {
                if target.len() != self.source.len() {
                    tracing::warn!(
                        source = self.source.len(),
                        target = target.len(),
                        "source and target lengths differ, exporting aligned prefix only"
                    );
                }
                for (src, tgt) in self.source.processed.iter().zip(&target.processed) {
                    writer.write(&RecordRef {
                        src,
                        tgt: Some(tgt),
                    })?;
                }
            }
        }

        let records = writer.finish()?;
        tracing::info!(records, path = %path.display(), "saved dataset");
        Ok(records)
    }
}

/// Builder for [`SummarizationDataset`]
#[derive(Default)]
pub struct SummarizationDatasetBuilder {
    source_file: Option<PathBuf>,
    source_lines: Vec<String>,
    target_file: Option<PathBuf>,
    target_lines: Vec<String>,
    source_chain: TransformChain,
    target_chain: TransformChain,
    tokenizer: Option<Arc<dyn Tokenizer>>,
    config: DatasetConfig,
}

impl SummarizationDatasetBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Read source paragraphs from a file
    pub fn source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    /// Append in-memory source paragraphs (after any file lines)
    pub fn source_lines(mut self, lines: Vec<String>) -> Self {
        self.source_lines.extend(lines);
        self
    }

    /// Read target summaries from a file
    pub fn target_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target_file = Some(path.into());
        self
    }

    /// Append in-memory target summaries (after any file lines)
    pub fn target_lines(mut self, lines: Vec<String>) -> Self {
        self.target_lines.extend(lines);
        self
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

    /// Replace the whole configuration
    pub fn config(mut self, config: DatasetConfig) -> Self {
        self.config = config;
        self
    }

    /// Limit the number of lines read from each file
    pub fn top_n(mut self, top_n: Option<usize>) -> Self {
        self.config.top_n = top_n;
        self
    }

    /// Worker pool size
    pub fn workers(mut self, workers: WorkerCount) -> Self {
        self.config.workers = workers;
        self
    }

    /// Empty-result filtering policy
    pub fn filter_policy(mut self, policy: FilterPolicy) -> Self {
        self.config.filter_policy = policy;
        self
    }

    /// Load, preprocess and filter both corpora
    pub fn build(self) -> Result<SummarizationDataset> {
        self.config.validate()?;
        let DatasetConfig {
            top_n,
            workers,
            filter_policy,
        } = self.config;

        let source_raw = load_corpus(self.source_file.as_deref(), self.source_lines, top_n)?;
        let target_raw = load_corpus(self.target_file.as_deref(), self.target_lines, top_n)?;

        // An empty target corpus means "no target"
        let has_target = !target_raw.is_empty();
        if has_target && source_raw.len() != target_raw.len() {
            return Err(DatasetError::CorpusLengthMismatch {
                source_lines: source_raw.len(),
                target_lines: target_raw.len(),
            });
        }

        let source_preprocessor =
            Preprocessor::new(self.source_chain).with_tokenizer(self.tokenizer.clone());
        let source_processed = parallel_preprocess(&source_raw, &source_preprocessor, workers)?;

        let target_processed = if has_target {
            let target_preprocessor =
                Preprocessor::new(self.target_chain).with_tokenizer(self.tokenizer);
            Some(parallel_preprocess(&target_raw, &target_preprocessor, workers)?)
        } else {
            None
        };

        let source_keep = non_empty(&source_processed);
        let (source, target) = match target_processed {
            None => (Corpus::retain(source_raw, source_processed, &source_keep), None),
            Some(target_processed) => {
                let target_keep = non_empty(&target_processed);
                let (source_keep, target_keep) = match filter_policy {
                    FilterPolicy::PerCorpus => (source_keep, target_keep),
                    FilterPolicy::Aligned => {
                        let both: Vec<bool> = source_keep
                            .iter()
                            .zip(&target_keep)
                            .map(|(s, t)| *s && *t)
                            .collect();
                        (both.clone(), both)
                    }
                };
                (
                    Corpus::retain(source_raw, source_processed, &source_keep),
                    Some(Corpus::retain(target_raw, target_processed, &target_keep)),
                )
            }
        };

        tracing::info!(
            source = source.len(),
            target = target.as_ref().map_or(0, Corpus::len),
            ?filter_policy,
            "built summarization dataset"
        );

        Ok(SummarizationDataset { source, target })
    }
}

/// File lines (capped at `top_n`) followed by the in-memory lines
fn load_corpus(
    file: Option<&Path>,
    lines: Vec<String>,
    top_n: Option<usize>,
) -> Result<Vec<String>> {
    let mut corpus = match file {
        Some(path) => read_lines(path, top_n)?,
        None => Vec::new(),
    };
    corpus.extend(lines);
    Ok(corpus)
}

fn non_empty(processed: &[Processed]) -> Vec<bool> {
    processed.iter().map(|p| !p.is_empty()).collect()
}
