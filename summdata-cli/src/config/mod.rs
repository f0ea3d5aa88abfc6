//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Preprocessing pipeline configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config =
            toml::from_str(&content).map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Render as a TOML document
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

/// Transform and tokenizer names
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Transforms applied to source paragraphs, in order
    pub source_transforms: Vec<String>,

    /// Transforms applied to target summaries, in order
    pub target_transforms: Vec<String>,

    /// Tokenizer name (untokenized when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<String>,

    /// Drop a pair when either side is empty instead of filtering each corpus
    pub aligned: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_transforms: vec!["strip".to_string()],
            target_transforms: vec!["strip".to_string()],
            tokenizer: None,
            aligned: false,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,

    /// Read at most this many lines from each input file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.pipeline.source_transforms, vec!["strip"]);
        assert_eq!(config.pipeline.tokenizer, None);
        assert!(!config.pipeline.aligned);
        assert_eq!(config.performance.worker_threads, 0);
        assert_eq!(config.performance.top_n, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
[pipeline]
tokenizer = "whitespace"

[performance]
worker_threads = 4
"#,
        )
        .unwrap();

        assert_eq!(config.pipeline.tokenizer.as_deref(), Some("whitespace"));
        assert_eq!(config.pipeline.target_transforms, vec!["strip"]);
        assert_eq!(config.performance.worker_threads, 4);
    }

    #[test]
    fn test_default_survives_toml_round_trip() {
        let config = CliConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[pipeline]"));
        assert!(rendered.contains("[performance]"));

        let parsed: CliConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[performance]\ntop_n = 10").unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.performance.top_n, Some(10));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline\nbroken").unwrap();

        let error = CliConfig::from_file(file.path()).unwrap_err();
        assert!(error.downcast_ref::<CliError>().is_some());
    }
}
