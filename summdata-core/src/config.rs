//! Configuration for dataset construction

use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};

/// Number of workers used by the parallel coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerCount {
    /// One worker per available CPU core
    #[default]
    Auto,
    /// A fixed number of workers (must be greater than 0)
    Fixed(usize),
}

impl WorkerCount {
    /// Effective pool size for `items` work items.
    ///
    /// Never larger than the number of items; 0 only when there are no items.
    pub fn resolve(self, items: usize) -> usize {
        let requested = match self {
            WorkerCount::Auto => available_cores(),
            WorkerCount::Fixed(n) => n,
        };
        requested.min(items)
    }

    /// Map the CLI convention (0 = auto) onto a worker count
    pub fn from_threads(threads: usize) -> Self {
        if threads == 0 {
            WorkerCount::Auto
        } else {
            WorkerCount::Fixed(threads)
        }
    }
}

#[cfg(feature = "parallel")]
fn available_cores() -> usize {
    num_cpus::get()
}

#[cfg(not(feature = "parallel"))]
fn available_cores() -> usize {
    1
}

/// How empty preprocessing results are removed from a paired dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPolicy {
    /// Filter source and target independently. Pairs can drift apart when
    /// the two corpora produce empty results at different indices.
    #[default]
    PerCorpus,
    /// Drop an index from both corpora when either side is empty
    Aligned,
}

/// Dataset construction settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Maximum number of lines read from each corpus file (None = all)
    pub top_n: Option<usize>,
    /// Worker pool size for preprocessing
    pub workers: WorkerCount,
    /// Empty-result filtering policy
    pub filter_policy: FilterPolicy,
}

impl DatasetConfig {
    /// Create a configuration builder
    pub fn builder() -> DatasetConfigBuilder {
        DatasetConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.workers == WorkerCount::Fixed(0) {
            return Err(DatasetError::Configuration(
                "workers must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

/// Fluent builder for [`DatasetConfig`]
#[derive(Debug, Default)]
pub struct DatasetConfigBuilder {
    top_n: Option<usize>,
    workers: Option<WorkerCount>,
    filter_policy: Option<FilterPolicy>,
}

impl DatasetConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of lines read from each file
    pub fn top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set the worker count
    pub fn workers(mut self, workers: WorkerCount) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the empty-result filtering policy
    pub fn filter_policy(mut self, policy: FilterPolicy) -> Self {
        self.filter_policy = Some(policy);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<DatasetConfig> {
        let mut config = DatasetConfig {
            top_n: self.top_n,
            ..DatasetConfig::default()
        };

        if let Some(workers) = self.workers {
            config.workers = workers;
        }

        if let Some(policy) = self.filter_policy {
            config.filter_policy = policy;
        }

        config.validate()?;
        Ok(config)
    }
}
