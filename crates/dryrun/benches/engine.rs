//! Engine overhead benchmarks
//!
//! Measures the per-slot cost of the test engine (scheduling, shuffling,
//! hooks and tick rendering) with trivial case bodies, and the loop overhead
//! of the benchmark engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dryrun::{run_benchmarks_with, run_tests_with, BenchSuite, Options, TestSuite};
use std::io;

fn suite_of(size: usize) -> TestSuite<'static> {
    let mut suite = TestSuite::new();
    for index in 0..size {
        suite.add_test(format!("case {index}"), move || black_box(index % 7 != 0));
    }
    suite.before_each(|| {}).after_each(|| {});
    suite
}

fn bench_test_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("test_engine");
    for size in [10, 100, 1000] {
        let determinate = Options::default().with_determinate(true);
        let shuffled = Options::default().with_seed(7);

        group.bench_with_input(BenchmarkId::new("determinate", size), &size, |b, &size| {
            let mut suite = suite_of(size);
            b.iter(|| run_tests_with(&determinate, &mut suite, io::sink()));
        });
        group.bench_with_input(BenchmarkId::new("shuffled", size), &size, |b, &size| {
            let mut suite = suite_of(size);
            b.iter(|| run_tests_with(&shuffled, &mut suite, io::sink()));
        });
    }
    group.finish();
}

fn bench_benchmark_engine(c: &mut Criterion) {
    c.bench_function("benchmark_engine_noop_10k", |b| {
        let mut suite = BenchSuite::new();
        suite.add_benchmark("noop", 10_000, || {});
        let options = Options::default();
        b.iter(|| run_benchmarks_with(&options, &mut suite, io::sink()));
    });
}

criterion_group!(benches, bench_test_engine, bench_benchmark_engine);
criterion_main!(benches);
