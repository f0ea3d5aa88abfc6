//! Build command implementation

use super::pipeline::PipelineArgs;
use crate::error::CliError;
use crate::output::{open_jsonl, ExportRecord};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use summdata_core::{FilterPolicy, SummarizationDataset, WorkerCount};

/// Arguments for the build command
#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output JSONL file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep only the first N examples after filtering
    #[arg(long, value_name = "N")]
    pub shorten: Option<usize>,

    /// Number of worker threads (0 = auto)
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Drop a pair when either side is empty
    #[arg(long)]
    pub aligned: bool,
}

impl BuildArgs {
    /// Execute the build command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        log::info!("Building dataset from {}", self.pipeline.source.display());
        log::debug!("Arguments: {:?}", self);

        self.pipeline.check_inputs()?;
        let pipeline = self.pipeline.resolve()?;

        let workers = match self.threads {
            Some(threads) => WorkerCount::from_threads(threads),
            None => pipeline.workers,
        };
        let filter_policy = if self.aligned || pipeline.aligned {
            FilterPolicy::Aligned
        } else {
            FilterPolicy::PerCorpus
        };

        let mut builder = SummarizationDataset::builder()
            .source_file(&self.pipeline.source)
            .source_chain(pipeline.source_chain)
            .target_chain(pipeline.target_chain)
            .top_n(pipeline.top_n)
            .workers(workers)
            .filter_policy(filter_policy);
        if let Some(target) = &self.pipeline.target {
            builder = builder.target_file(target);
        }
        if let Some(tokenizer) = pipeline.tokenizer {
            builder = builder.tokenizer(tokenizer);
        }

        let mut progress = ProgressReporter::new(quiet);
        progress.init_spinner("Preprocessing corpora");
        let built = builder.build();
        progress.finish("Preprocessed");
        let mut dataset = built
            .map_err(CliError::from)
            .context("Failed to build dataset")?;

        dataset.shorten(self.shorten);

        let records = match &self.output {
            Some(path) => dataset
                .save_to_jsonl(path)
                .map_err(CliError::from)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => self.write_stdout(&dataset, &mut progress)?,
        };

        log::info!("Wrote {records} records");
        Ok(())
    }

    fn write_stdout(
        &self,
        dataset: &SummarizationDataset,
        progress: &mut ProgressReporter,
    ) -> Result<usize> {
        let mut writer = open_jsonl(None)?;
        progress.init_records(Some(dataset.len() as u64));

        match dataset.target() {
            None => {
                for src in dataset.source() {
                    writer.write(&ExportRecord { src, tgt: None })?;
                    progress.record_written();
                }
            }
            Some(target) => {
                if target.len() != dataset.len() {
                    log::warn!(
                        "Source has {} examples but target has {}, writing aligned prefix only",
                        dataset.len(),
                        target.len()
                    );
                }
                for (src, tgt) in dataset.source().iter().zip(target) {
                    writer.write(&ExportRecord {
                        src,
                        tgt: Some(tgt),
                    })?;
                    progress.record_written();
                }
            }
        }

        let records = writer.finish()?;
        progress.finish("Complete");
        Ok(records)
    }
}
