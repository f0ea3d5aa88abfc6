//! Parallel preprocessing coordinator
//!
//! Each call builds its own Rayon pool, maps every item through the
//! [`Preprocessor`] and drops the pool before returning. Results come back in
//! input order; the first failing item fails the whole batch.

use crate::config::WorkerCount;
use crate::error::{DatasetError, Result};
use crate::preprocess::{Processed, Preprocessor};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of consecutive items handed to a worker at once. Never 0.
pub fn chunk_size(items: usize, workers: usize) -> usize {
    if workers == 0 {
        return 1;
    }
    (items / workers).max(1)
}

/// Preprocess `items` on a scoped worker pool, preserving input order.
///
/// An empty slice returns immediately without building a pool.
pub fn parallel_preprocess(
    items: &[String],
    preprocessor: &Preprocessor,
    workers: WorkerCount,
) -> Result<Vec<Processed>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let pool_size = workers.resolve(items.len());
    if pool_size == 0 {
        return Err(DatasetError::Configuration(
            "workers must be greater than 0".into(),
        ));
    }

    let chunk = chunk_size(items.len(), pool_size);
    tracing::debug!(
        items = items.len(),
        pool_size,
        chunk,
        "starting parallel preprocessing"
    );

    run_pool(items, preprocessor, pool_size, chunk)
}

#[cfg(feature = "parallel")]
fn run_pool(
    items: &[String],
    preprocessor: &Preprocessor,
    pool_size: usize,
    chunk: usize,
) -> Result<Vec<Processed>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(pool_size)
        .thread_name(|i| format!("summdata-worker-{i}"))
        .build()
        .map_err(|e| DatasetError::WorkerPool(e.to_string()))?;

    pool.install(|| {
        items
            .par_iter()
            .with_min_len(chunk)
            .map(|item| preprocessor.process(item.as_str()))
            .collect::<Result<Vec<_>>>()
    })
}

#[cfg(not(feature = "parallel"))]
fn run_pool(
    items: &[String],
    preprocessor: &Preprocessor,
    _pool_size: usize,
    _chunk: usize,
) -> Result<Vec<Processed>> {
    // Fallback to sequential if parallel feature is disabled
    items
        .iter()
        .map(|item| preprocessor.process(item.as_str()))
        .collect()
}
