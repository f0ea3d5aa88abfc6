//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use summdata_core::TransformRegistry;

pub mod build;
pub mod generate_config;
pub mod inspect;
pub mod pipeline;
pub mod stream;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load, preprocess and filter a paired corpus, then export it as JSONL
    Build(build::BuildArgs),

    /// Preprocess a corpus line by line without loading it into memory
    Stream(stream::StreamArgs),

    /// Summarize an exported JSONL file
    Inspect(inspect::InspectArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command; `quiet` hides progress bars
    pub fn execute(&self, quiet: bool) -> Result<()> {
        match self {
            Commands::Build(args) => args.execute(quiet),
            Commands::Stream(args) => args.execute(quiet),
            Commands::Inspect(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List available transforms
    Transforms,

    /// List available tokenizers
    Tokenizers,
}

impl ListCommands {
    /// Print names and descriptions from the built-in registry
    pub fn execute(&self) -> Result<()> {
        let registry = TransformRegistry::with_builtins()?;
        let (title, entries) = match self {
            ListCommands::Transforms => ("Available transforms:", registry.transforms()),
            ListCommands::Tokenizers => ("Available tokenizers:", registry.tokenizers()),
        };

        println!("{title}");
        for (name, description) in entries {
            println!("  {name:<20} {description}");
        }
        Ok(())
    }
}
