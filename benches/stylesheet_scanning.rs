//! Stylesheet scanning and bundling benchmarks
//!
//! Measures:
//! - Font URL and `@font-face` extraction for growing stylesheets (1, 10, 100, 1000 rules)
//! - A full offline `generate` run with varying fetch pool sizes (1, 2, 4, 8)
//!
//! Run benchmarks: `cargo bench --bench stylesheet_scanning`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fonthunter::parser::{extract_font_family_names, extract_font_urls};
use fonthunter::{ExecutorImpl, FontHunterBuilder, InMemoryFetcher};
use std::hint::black_box;
use std::sync::Arc;

const BASE_URL: &str = "https://fonts.example.test/css?family=Bench:400,700";

/// A font-service style stylesheet with `count` rules, alternating absolute
/// and relative font references.
fn generate_stylesheet(count: usize) -> String {
    (0..count)
        .map(|i| {
            let src = if i % 2 == 0 {
                format!("https://cdn.example.test/s/bench/v1/font-{}.woff2", i)
            } else {
                format!("fonts/font-{}.ttf?v={}", i, i)
            };
            format!(
                "@font-face {{\n  font-family: 'Bench {}';\n  font-style: normal;\n  font-weight: 400;\n  src: url({}) format('woff2');\n}}\n",
                i % 7,
                src
            )
        })
        .collect()
}

fn benchmark_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("stylesheet_scanning");

    for count in [1, 10, 100, 1000] {
        let css = generate_stylesheet(count);
        group.throughput(Throughput::Bytes(css.len() as u64));

        group.bench_with_input(BenchmarkId::new("font_urls", count), &css, |b, css| {
            b.iter(|| extract_font_urls(black_box(css), BASE_URL));
        });
        group.bench_with_input(BenchmarkId::new("family_names", count), &css, |b, css| {
            b.iter(|| extract_font_family_names(black_box(css)));
        });
    }

    group.finish();
}

fn benchmark_fetch_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("fetch_pool");
    let font_count = 32;

    let css = generate_stylesheet(font_count);
    let fetcher = Arc::new(InMemoryFetcher::new());
    fetcher.add(BASE_URL, css.clone()).expect("Failed to register stylesheet");
    for url in extract_font_urls(&css, BASE_URL) {
        fetcher
            .add(url, vec![0u8; 16 * 1024])
            .expect("Failed to register font");
    }

    for workers in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(font_count as u64));
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, &workers| {
            let root = tempfile::tempdir().expect("Failed to create storage root");
            let pipeline = FontHunterBuilder::new()
                .with_storage_root(root.path())
                .with_session("bench")
                .with_fetcher(fetcher.clone())
                .with_executor(ExecutorImpl::bounded(workers).expect("Failed to build executor"))
                .build()
                .expect("Failed to build pipeline");

            b.iter(|| {
                let result = pipeline.generate(BASE_URL);
                assert!(result.downloadable);
                result
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_extraction, benchmark_fetch_pool);
criterion_main!(benches);
