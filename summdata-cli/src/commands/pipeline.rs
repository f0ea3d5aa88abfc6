//! Pipeline options shared by the build and stream commands

use crate::config::CliConfig;
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use summdata_core::{Tokenizer, TransformChain, TransformRegistry, WorkerCount};

/// Input files and preprocessing options
#[derive(Debug, Clone, Default, Args)]
pub struct PipelineArgs {
    /// Source paragraphs, one per line
    #[arg(short, long, value_name = "FILE")]
    pub source: PathBuf,

    /// Target summaries, one per line
    #[arg(short, long, value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// Source transforms, comma separated (see `list transforms`)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub source_transforms: Vec<String>,

    /// Target transforms, comma separated
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub target_transforms: Vec<String>,

    /// Tokenizer applied to both corpora (see `list tokenizers`)
    #[arg(long, value_name = "NAME")]
    pub tokenizer: Option<String>,

    /// Read at most N lines from each input file
    #[arg(short = 'n', long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "SUMMDATA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Resolved preprocessing setup
pub struct Pipeline {
    /// Transforms for source lines
    pub source_chain: TransformChain,
    /// Transforms for target lines
    pub target_chain: TransformChain,
    /// Shared tokenizer, if any
    pub tokenizer: Option<Arc<dyn Tokenizer>>,
    /// Per-file line limit
    pub top_n: Option<usize>,
    /// Worker pool size from the configuration file
    pub workers: WorkerCount,
    /// Whether the configuration file asks for aligned filtering
    pub aligned: bool,
}

impl PipelineArgs {
    /// Merge command-line flags over the configuration file
    pub fn resolve(&self) -> Result<Pipeline> {
        let config = CliConfig::load(self.config.as_deref())?;
        let registry = TransformRegistry::with_builtins()?;

        let source_names = pick(&self.source_transforms, &config.pipeline.source_transforms);
        let target_names = pick(&self.target_transforms, &config.pipeline.target_transforms);

        let tokenizer = match self.tokenizer.as_ref().or(config.pipeline.tokenizer.as_ref()) {
            Some(name) => Some(
                registry
                    .tokenizer(name)
                    .map_err(|e| CliError::ConfigError(e.to_string()))?,
            ),
            None => None,
        };

        let pipeline = Pipeline {
            source_chain: registry
                .chain(source_names)
                .map_err(|e| CliError::ConfigError(e.to_string()))?,
            target_chain: registry
                .chain(target_names)
                .map_err(|e| CliError::ConfigError(e.to_string()))?,
            tokenizer,
            top_n: self.top_n.or(config.performance.top_n),
            workers: WorkerCount::from_threads(config.performance.worker_threads),
            aligned: config.pipeline.aligned,
        };

        log::debug!(
            "Pipeline: source {:?}, target {:?}, tokenizer {:?}",
            pipeline.source_chain.names(),
            pipeline.target_chain.names(),
            pipeline.tokenizer.as_ref().map(|t| t.name().to_string())
        );

        Ok(pipeline)
    }

    /// Fail early with a readable message when an input file is missing
    pub fn check_inputs(&self) -> Result<()> {
        check_exists(&self.source)?;
        if let Some(target) = &self.target {
            check_exists(target)?;
        }
        Ok(())
    }
}

fn pick<'a>(flags: &'a [String], configured: &'a [String]) -> &'a [String] {
    if flags.is_empty() {
        configured
    } else {
        flags
    }
}

fn check_exists(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.display().to_string()).into())
    }
}
