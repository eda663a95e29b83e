//! Criterion benchmarks for the beat-route optimizer.
//!
//! Uses synthetic beats (uniform random outlets in a square degree cell)
//! to measure matrix construction, the 2-opt local search, and full
//! optimization runs at interactive sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use beat_route::distance::DistanceMatrix;
use beat_route::geo::Point;
use beat_route::local_search::two_opt_improve;
use beat_route::optimizer::{OptimizerConfig, RouteOptimizer, DEFAULT_TWO_OPT_WINDOW};

fn synthetic_beat(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point::new(
                12.9 + rng.random_range(0.0..0.2),
                77.5 + rng.random_range(0.0..0.2),
            )
        })
        .collect()
}

fn bench_distance_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_matrix");
    for n in [50, 200] {
        let stops = synthetic_beat(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stops, |b, stops| {
            b.iter(|| DistanceMatrix::from_points(black_box(stops)).unwrap());
        });
    }
    group.finish();
}

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt");
    for n in [50, 200] {
        let stops = synthetic_beat(n, 2);
        let matrix = DistanceMatrix::from_points(&stops).unwrap();
        let mut scrambled: Vec<usize> = (0..n).collect();
        scrambled.rotate_left(n / 3);
        scrambled.swap(1, n - 2);

        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, matrix| {
            b.iter(|| {
                let mut tour = scrambled.clone();
                two_opt_improve(&mut tour, matrix, DEFAULT_TWO_OPT_WINDOW);
                tour
            });
        });
    }
    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(10);
    for n in [10, 25] {
        let stops = synthetic_beat(n, 3);
        // Shortened run so each sample stays interactive-sized.
        let config = OptimizerConfig::default()
            .with_population_bounds(30, 30)
            .with_generation_bounds(20, 20)
            .with_seed(42);
        let optimizer = RouteOptimizer::new(config);

        group.bench_with_input(BenchmarkId::from_parameter(n), &stops, |b, stops| {
            b.iter(|| optimizer.optimize(black_box(stops)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distance_matrix, bench_two_opt, bench_optimize);
criterion_main!(benches);
