//! Performance benchmarks for feature extraction and batch classification
//!
//! Run with: cargo bench --bench leveling_benchmarks

use azlevel_core::{compute_features, Document, Heuristics, Leveler, PlainTextExtractor, Rubric};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

/// Generate manuscript text of roughly the given size
fn generate_text(size: usize) -> String {
    let base = "Although the river was wide, the children crossed it carefully. \
                They laughed, because the water was warm. ";
    let mut text = base.repeat(size / base.len() + 1);
    text.truncate(size);
    text
}

/// Benchmark feature extraction across sample sizes
fn bench_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("features");
    let heuristics = Heuristics::default();

    for size in [1_024, 10_240, 50_000] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| compute_features(black_box(text), &heuristics).ok());
        });
    }

    group.finish();
}

/// Benchmark sequential vs parallel batches
fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let leveler = Leveler::new();
    let extractor = PlainTextExtractor::default();
    let rubric = Rubric::default();

    for count in [8, 64] {
        let documents: Vec<Document> = (0..count)
            .map(|i| Document::from_text(format!("{i}.txt"), generate_text(20_000)))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("sequential", count),
            &documents,
            |b, documents| {
                b.iter(|| leveler.classify_batch(black_box(documents), &extractor, &rubric));
            },
        );

        #[cfg(feature = "parallel")]
        group.bench_with_input(
            BenchmarkId::new("parallel", count),
            &documents,
            |b, documents| {
                b.iter(|| {
                    leveler
                        .classify_batch_parallel(black_box(documents), &extractor, &rubric, |_| {})
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_features, bench_batch);
criterion_main!(benches);
