//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let template = self.generate_template()?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, template)
                    .with_context(|| format!("Failed to write to {}", path.display()))?;
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!();
                eprintln!("Use it with:");
                eprintln!(
                    "   summdata build -s source.txt -t target.txt --config {}",
                    path.display()
                );
            }
            None => print!("{template}"),
        }

        Ok(())
    }

    /// Default configuration with a short header
    fn generate_template(&self) -> Result<String> {
        let body = CliConfig::default().to_toml()?;
        Ok(format!(
            "# summdata configuration\n\
             #\n\
             # [pipeline] names transforms and an optional tokenizer (see `summdata list`).\n\
             # Add `tokenizer = \"whitespace\"` to emit token lists.\n\
             # [performance] worker_threads = 0 uses one worker per CPU core;\n\
             # add `top_n = N` to read at most N lines per file.\n\n{body}"
        ))
    }
}
