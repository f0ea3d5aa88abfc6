//! Performance benchmarks for parallel preprocessing
//!
//! Run with: cargo bench --bench preprocess_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;
use summdata_core::{
    parallel_preprocess, Preprocessor, SummarizationDataset, TransformRegistry,
    WhitespaceTokenizer, WorkerCount,
};

/// Generate `count` paragraphs of a few sentences each
fn generate_paragraphs(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "Paragraph {i} opens here.  It carries a hyph- enated word! \
                 Does it end with a question? Yes.\n"
            )
        })
        .collect()
}

fn sentence_preprocessor() -> Preprocessor {
    let registry = TransformRegistry::with_builtins().unwrap();
    let chain = registry
        .chain(&[
            "strip",
            "dehyphenate",
            "collapse-whitespace",
            "split-sentences",
        ])
        .unwrap();
    Preprocessor::new(chain).with_tokenizer(Some(Arc::new(WhitespaceTokenizer)))
}

/// Benchmark parallel preprocessing with different worker counts
fn bench_worker_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_counts");

    let items = generate_paragraphs(20_000);
    let preprocessor = sentence_preprocessor();

    for workers in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(items.len() as u64));
        group.bench_with_input(BenchmarkId::new("workers", workers), &items, |b, items| {
            b.iter(|| {
                let _ = parallel_preprocess(
                    black_box(items),
                    &preprocessor,
                    WorkerCount::Fixed(workers),
                )
                .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark corpus sizes with an automatically sized pool
fn bench_corpus_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus_sizes");
    let preprocessor = sentence_preprocessor();

    for size in [100, 1_000, 10_000] {
        let items = generate_paragraphs(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("auto", size), &items, |b, items| {
            b.iter(|| {
                let _ = parallel_preprocess(black_box(items), &preprocessor, WorkerCount::Auto)
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark building a paired dataset end to end
fn bench_dataset_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("dataset_build");
    group.sample_size(20);

    let registry = TransformRegistry::with_builtins().unwrap();
    let source = generate_paragraphs(5_000);
    let target: Vec<String> = (0..source.len())
        .map(|i| format!("Summary {i}.\n"))
        .collect();

    group.throughput(Throughput::Elements(source.len() as u64));
    group.bench_function("paired_5000", |b| {
        b.iter(|| {
            let dataset = SummarizationDataset::builder()
                .source_lines(black_box(source.clone()))
                .target_lines(black_box(target.clone()))
                .source_chain(registry.chain(&["strip", "split-sentences"]).unwrap())
                .target_chain(registry.chain(&["strip"]).unwrap())
                .build()
                .unwrap();
            black_box(dataset.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_worker_counts,
    bench_corpus_sizes,
    bench_dataset_build
);
criterion_main!(benches);
