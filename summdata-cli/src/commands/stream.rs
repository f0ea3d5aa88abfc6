//! Stream command implementation

use super::pipeline::PipelineArgs;
use crate::error::CliError;
use crate::output::{open_jsonl, ExportRecord};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use summdata_core::{IterableSummarizationDataset, StreamingOptions};

/// Arguments for the stream command
#[derive(Debug, Args)]
pub struct StreamArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output JSONL file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl StreamArgs {
    /// Execute the stream command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        log::info!("Streaming {}", self.pipeline.source.display());
        log::debug!("Arguments: {:?}", self);

        self.pipeline.check_inputs()?;
        let pipeline = self.pipeline.resolve()?;

        let mut options = StreamingOptions::new()
            .source_chain(pipeline.source_chain)
            .target_chain(pipeline.target_chain)
            .top_n(pipeline.top_n);
        if let Some(tokenizer) = pipeline.tokenizer {
            options = options.tokenizer(tokenizer);
        }

        let dataset = IterableSummarizationDataset::new(
            &self.pipeline.source,
            self.pipeline.target.as_deref(),
            options,
        )
        .map_err(CliError::from)
        .context("Failed to open dataset")?;

        let mut writer = open_jsonl(self.output.as_deref())?;
        let mut progress = ProgressReporter::new(quiet);
        progress.init_records(None);

        let (mut source, target) = dataset.into_parts();
        match target {
            None => {
                for src in source {
                    let src = src
                        .map_err(CliError::from)
                        .context("Failed to preprocess source line")?;
                    writer.write(&ExportRecord {
                        src: &src,
                        tgt: None,
                    })?;
                    progress.record_written();
                }
            }
            Some(mut target) => loop {
                let (src, tgt) = match (source.next(), target.next()) {
                    (Some(src), Some(tgt)) => (src, tgt),
                    (None, None) => break,
                    // A failure on the longer side is still a failure
                    (Some(Err(error)), None) => {
                        return Err(CliError::from(error))
                            .context("Failed to preprocess source line");
                    }
                    (None, Some(Err(error))) => {
                        return Err(CliError::from(error))
                            .context("Failed to preprocess target line");
                    }
                    (src, _) => {
                        log::warn!(
                            "{} ended first, stopping after {} records",
                            if src.is_none() { "source" } else { "target" },
                            writer.records()
                        );
                        break;
                    }
                };
                let src = src
                    .map_err(CliError::from)
                    .context("Failed to preprocess source line")?;
                let tgt = tgt
                    .map_err(CliError::from)
                    .context("Failed to preprocess target line")?;
                writer.write(&ExportRecord {
                    src: &src,
                    tgt: Some(&tgt),
                })?;
                progress.record_written();
            },
        }

        let records = writer.finish()?;
        progress.finish("Complete");
        log::info!("Wrote {records} records");
        Ok(())
    }
}
