/// Regression Pipeline Benchmarks
///
/// Measures site selection, design matrix construction and the SVD solve
/// at sizes typical of a randomized-inlining experiment.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use solve_inlines::records::BenchmarkTrial;
use solve_inlines::regression::{self, DesignMatrix, SolveConfig};
use solve_inlines::selection;
use std::time::Duration;

/// Trials with noise-free times from a fixed per-site effect
fn synthetic_trials(sites: usize, trials: usize) -> Vec<BenchmarkTrial> {
    (1..=trials as i64)
        .map(|seed| {
            let time = 10.0
                + selection::active_indices(seed, 67, sites)
                    .into_iter()
                    .map(|i| (i % 7) as f64 * 0.01 - 0.03)
                    .sum::<f64>();
            BenchmarkTrial {
                seed,
                threshold: 67,
                time,
                noise: -1,
            }
        })
        .collect()
}

/// Benchmark: selection for a single trial
fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    for sites in [100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(sites as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sites), &sites, |b, &sites| {
            b.iter(|| black_box(selection::select(black_box(42), 67, sites)));
        });
    }

    group.finish();
}

/// Benchmark: design matrix construction
fn bench_design_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("design_matrix");

    for (sites, trials) in [(50usize, 200usize), (200, 800)] {
        let input = synthetic_trials(sites, trials);
        group.bench_with_input(
            BenchmarkId::new("build", format!("{}x{}", trials, sites + 1)),
            &input,
            |b, input| {
                b.iter(|| black_box(DesignMatrix::build(input, sites).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark: SVD least-squares solve
fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let config = SolveConfig::default();
    for (sites, trials) in [(50usize, 200usize), (200, 800)] {
        let design = DesignMatrix::build(&synthetic_trials(sites, trials), sites).unwrap();
        group.bench_with_input(
            BenchmarkId::new("svd", format!("{}x{}", trials, sites + 1)),
            &design,
            |b, design| {
                b.iter(|| black_box(regression::solve(design, &config).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_selection, bench_design_matrix, bench_solve);

criterion_main!(benches);
