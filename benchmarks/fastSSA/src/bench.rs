//! SSA benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (10 to 60 variables)
//! - Sweep width (number of dimensionalities)
//! - Regression modes (global, local, metric)
//! - Input variants (missing pairs, dichotomous profiles)
//! - The monotone regression kernel on its own
//!
//! For serial execution, use `FASTSSA_MODE=serial cargo bench`.
//! For parallel execution, use `FASTSSA_MODE=parallel cargo bench`.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fastSSA::prelude::*;
use rand::prelude::*;
use rand_distr::{Bernoulli, Normal, Uniform};
use ssa::internals::algorithms::proximity::canonicalize;
use ssa::internals::algorithms::regression::fit_disparities;
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (bool, &'static str) {
    match env::var("FASTSSA_MODE").ok().as_deref() {
        Some("serial") => (false, "serial"),
        Some("parallel") | _ => (true, "parallel"),
    }
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Distances between random points in `dim` dimensions with Gaussian noise.
fn generate_euclidean(numvars: usize, dim: usize, seed: u64) -> ProximityMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let coord = Uniform::new(-1.0, 1.0).unwrap();
    let noise = Normal::new(0.0, 0.05).unwrap();

    let points: Vec<Vec<f64>> = (0..numvars)
        .map(|_| (0..dim).map(|_| coord.sample(&mut rng)).collect())
        .collect();

    let mut values = vec![0.0; numvars * numvars];
    for i in 0..numvars {
        for j in (i + 1)..numvars {
            let d: f64 = points[i]
                .iter()
                .zip(&points[j])
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            let v = (d + noise.sample(&mut rng)).max(0.0);
            values[i * numvars + j] = v;
            values[j * numvars + i] = v;
        }
    }
    ProximityMatrix::full(numvars, values)
}

/// Same as `generate_euclidean` with a share of pairs marked missing (-1).
fn generate_with_missing(numvars: usize, share: f64, seed: u64) -> ProximityMatrix<f64> {
    let mut matrix = generate_euclidean(numvars, 3, seed);
    let mut rng = StdRng::seed_from_u64(seed + 1);
    for i in 0..numvars {
        for j in (i + 1)..numvars {
            if rng.random::<f64>() < share {
                matrix.values[i * numvars + j] = -1.0;
                matrix.values[j * numvars + i] = -1.0;
            }
        }
    }
    matrix
}

/// Dichotomous `observations x numvars` profile table.
fn generate_profiles(observations: usize, numvars: usize, seed: u64) -> ProximityMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values = (0..observations * numvars)
        .map(|k| {
            // Neighbouring variables co-occur more often
            let p = 0.2 + 0.6 * ((k % numvars) as f64 / numvars as f64);
            let coin = Bernoulli::new(p).unwrap();
            if coin.sample(&mut rng) { 1.0 } else { 0.0 }
        })
        .collect();
    ProximityMatrix::profiles(numvars, values)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scalability_{}", mode_name));
    group.sample_size(20);

    for numvars in [10, 20, 40, 60] {
        group.throughput(Throughput::Elements((numvars * (numvars - 1) / 2) as u64));
        let matrix = generate_euclidean(numvars, 3, 42);

        group.bench_with_input(BenchmarkId::new("batch", numvars), &numvars, |b, _| {
            b.iter(|| {
                Ssa::new()
                    .dimensions(1, 4)
                    .random_starts(2)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .fit(black_box(&matrix))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_sweep_width(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("sweep_width_{}", mode_name));
    group.sample_size(20);

    let matrix = generate_euclidean(30, 4, 7);
    for maxd in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("maxd", maxd), &maxd, |b, &maxd| {
            b.iter(|| {
                Ssa::new()
                    .dimensions(1, maxd)
                    .adapter(Batch)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .fit(black_box(&matrix))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("modes_{}", mode_name));
    group.sample_size(20);

    let matrix = generate_euclidean(25, 2, 11);

    group.bench_function("global", |b| {
        b.iter(|| {
            Ssa::new()
                .dimensions(1, 3)
                .monotonicity(Global)
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .fit(black_box(&matrix))
                .unwrap()
        })
    });

    group.bench_function("local", |b| {
        b.iter(|| {
            Ssa::new()
                .dimensions(1, 3)
                .monotonicity(Local)
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .fit(black_box(&matrix))
                .unwrap()
        })
    });

    group.bench_function("metric", |b| {
        b.iter(|| {
            Ssa::new()
                .dimensions(1, 3)
                .metric()
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .fit(black_box(&matrix))
                .unwrap()
        })
    });

    group.bench_function("classical_start", |b| {
        b.iter(|| {
            Ssa::new()
                .dimensions(1, 3)
                .initial_configuration(Classical)
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .fit(black_box(&matrix))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_inputs(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("inputs_{}", mode_name));
    group.sample_size(20);

    let missing = generate_with_missing(30, 0.2, 3);
    group.bench_function("missing_pairs", |b| {
        b.iter(|| {
            Ssa::new()
                .dimensions(1, 3)
                .exclude_missing(-1.0)
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .fit(black_box(&missing))
                .unwrap()
        })
    });

    let profiles = generate_profiles(200, 20, 5);
    group.bench_function("jaccard_profiles", |b| {
        b.iter(|| {
            Ssa::new()
                .dimensions(1, 3)
                .contiguity_coefficient(Jaccard)
                .adapter(Batch)
                .parallel(use_parallel)
                .build()
                .unwrap()
                .fit(black_box(&profiles))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_regression_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression_kernel");
    group.sample_size(100);

    for numvars in [20, 50, 100] {
        let matrix = generate_euclidean(numvars, 3, 13);
        let dissim = canonicalize(
            &matrix,
            &MissingnessPolicy::None,
            &SelectionMask::new(numvars),
            1e-6,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let distances: Vec<f64> = (0..dissim.pair_count())
            .map(|_| rng.random_range(0.0..2.0))
            .collect();

        group.throughput(Throughput::Elements(dissim.pair_count() as u64));
        group.bench_with_input(BenchmarkId::new("global", numvars), &numvars, |b, _| {
            b.iter(|| {
                fit_disparities(
                    black_box(&dissim),
                    black_box(&distances),
                    MonotonicityMode::Global,
                    false,
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("local", numvars), &numvars, |b, _| {
            b.iter(|| {
                fit_disparities(
                    black_box(&dissim),
                    black_box(&distances),
                    MonotonicityMode::Local,
                    false,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_sweep_width,
    bench_modes,
    bench_inputs,
    bench_regression_kernel,
);

criterion_main!(benches);
