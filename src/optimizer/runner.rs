//! Evolutionary loop execution.
//!
//! [`RouteOptimizer`] orchestrates the complete run: distance matrix →
//! 2-opt-refined random population → generational breeding → best tour.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::OptimizerConfig;
use super::operators::{ordered_crossover, random_permutation, swap_mutation};
use crate::distance::DistanceMatrix;
use crate::error::RouteError;
use crate::geo::Point;
use crate::local_search::two_opt_improve;

/// Result of an optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSolution {
    /// Visit order as a permutation of the input indices.
    pub order: Vec<usize>,

    /// Euclidean open-path length of `order` (the search metric).
    ///
    /// Report user-facing distance with
    /// [`geo::route_distance_km`](crate::geo::route_distance_km) instead.
    pub length: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Diagnostic attached when the run failed mid-computation and the
    /// optimizer degraded to the identity ordering.
    pub degraded: Option<RouteError>,
}

/// A candidate tour paired with its open-path length.
#[derive(Debug, Clone)]
struct Tour {
    order: Vec<usize>,
    length: f64,
}

impl Tour {
    fn new(order: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let length = matrix.path_length(&order);
        Self { order, length }
    }
}

/// Hybrid genetic / 2-opt route optimizer.
///
/// Stateless across calls: the distance matrix and population live and die
/// within one [`optimize`](Self::optimize) invocation.
///
/// # Usage
///
/// ```
/// use beat_route::geo::Point;
/// use beat_route::optimizer::{OptimizerConfig, RouteOptimizer};
///
/// let stops = vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ];
/// let optimizer = RouteOptimizer::new(OptimizerConfig::default().with_seed(42));
/// let solution = optimizer.optimize(&stops).unwrap();
/// assert_eq!(solution.order.len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    config: OptimizerConfig,
}

impl RouteOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Computes a visit order for `stops`.
    ///
    /// Returns `Err` only for malformed input (non-finite coordinate or
    /// invalid configuration), before any computation starts. Failures during
    /// evolution never propagate: the optimizer logs the diagnostic and
    /// returns the identity ordering with [`RouteSolution::degraded`] set.
    ///
    /// Fewer than two stops yield the identity ordering directly.
    pub fn optimize(&self, stops: &[Point]) -> Result<RouteSolution, RouteError> {
        self.optimize_with(stops, None, |_| {})
    }

    /// Full-control variant: optional cancellation flag and a progress
    /// callback.
    ///
    /// The flag is checked at each generation boundary; a cancelled run
    /// returns the best tour found so far with `cancelled` set. The callback
    /// receives the monotonic fraction `(generation + 1) / generations` after
    /// each generation.
    pub fn optimize_with<F>(
        &self,
        stops: &[Point],
        cancel: Option<Arc<AtomicBool>>,
        mut progress: F,
    ) -> Result<RouteSolution, RouteError>
    where
        F: FnMut(f64),
    {
        self.config.validate().map_err(RouteError::InvalidInput)?;

        let n = stops.len();
        if n < 2 {
            return Ok(RouteSolution {
                order: (0..n).collect(),
                length: 0.0,
                generations: 0,
                cancelled: false,
                degraded: None,
            });
        }

        // Fail fast on malformed coordinates, before any computation.
        let matrix = DistanceMatrix::from_points(stops)?;

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.evolve(&matrix, cancel.as_deref(), &mut progress)
        }));

        match outcome {
            Ok(solution) => Ok(solution),
            Err(payload) => {
                let diagnostic = RouteError::Optimization(panic_message(&payload));
                log::warn!("optimize: degrading to identity order: {diagnostic}");
                let order: Vec<usize> = (0..n).collect();
                let length = matrix.path_length(&order);
                Ok(RouteSolution {
                    order,
                    length,
                    generations: 0,
                    cancelled: false,
                    degraded: Some(diagnostic),
                })
            }
        }
    }

    fn evolve<F>(
        &self,
        matrix: &DistanceMatrix,
        cancel: Option<&AtomicBool>,
        progress: &mut F,
    ) -> RouteSolution
    where
        F: FnMut(f64),
    {
        let cfg = &self.config;
        let n = matrix.size();
        let population_size = cfg.population_size(n);
        let generations = cfg.generations(n);
        let mutation_rate = cfg.mutation_rate(n);
        let elite_count = cfg.elite_count.min(population_size);
        let parent_pool = cfg.parent_pool.min(population_size);

        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        log::debug!(
            "optimize: start n={n} population={population_size} \
             generations={generations} mutation_rate={mutation_rate:.3}"
        );

        // Initial population: random permutations, each settled by 2-opt.
        let mut population: Vec<Tour> = (0..population_size)
            .map(|_| {
                let mut order = random_permutation(n, &mut rng);
                two_opt_improve(&mut order, matrix, cfg.two_opt_window);
                Tour::new(order, matrix)
            })
            .collect();

        let mut executed = 0;
        let mut cancelled = false;

        for gen in 0..generations {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            population.sort_by(|a, b| {
                a.length
                    .partial_cmp(&b.length)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut next_gen: Vec<Tour> = population[..elite_count].to_vec();

            while next_gen.len() < population_size {
                let p1 = &population[rng.random_range(0..parent_pool)];
                let p2 = &population[rng.random_range(0..parent_pool)];

                let mut child = ordered_crossover(&p1.order, &p2.order, &mut rng);
                if rng.random_range(0.0..1.0) < mutation_rate {
                    swap_mutation(&mut child, &mut rng);
                }
                two_opt_improve(&mut child, matrix, cfg.two_opt_window);

                next_gen.push(Tour::new(child, matrix));
            }

            population = next_gen;
            executed = gen + 1;
            progress(executed as f64 / generations as f64);
        }

        let best = population
            .iter()
            .min_by(|a, b| {
                a.length
                    .partial_cmp(&b.length)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("population is never empty");

        log::debug!(
            "optimize: done n={n} generations={executed} length={:.4} cancelled={cancelled}",
            best.length
        );

        RouteSolution {
            order: best.order.clone(),
            length: best.length,
            generations: executed,
            cancelled,
            degraded: None,
        }
    }
}

/// Best-effort extraction of a panic payload message.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        if perm.len() != n {
            return false;
        }
        let set: HashSet<usize> = perm.iter().copied().collect();
        set.len() == n && perm.iter().all(|&v| v < n)
    }

    /// Small test tuning so unit tests stay fast.
    fn quick_config(seed: u64) -> OptimizerConfig {
        OptimizerConfig::default()
            .with_population_bounds(20, 40)
            .with_generation_bounds(30, 60)
            .with_elite_count(4)
            .with_parent_pool(10)
            .with_seed(seed)
    }

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ]
    }

    // ---- Trivial inputs ----

    #[test]
    fn test_empty_and_single_return_identity() {
        let optimizer = RouteOptimizer::default();

        let empty = optimizer.optimize(&[]).unwrap();
        assert!(empty.order.is_empty());
        assert_eq!(empty.length, 0.0);
        assert_eq!(empty.generations, 0);

        let single = optimizer.optimize(&[Point::new(5.0, 5.0)]).unwrap();
        assert_eq!(single.order, vec![0]);
        assert_eq!(single.length, 0.0);
    }

    #[test]
    fn test_two_stops() {
        let optimizer = RouteOptimizer::new(quick_config(42));
        let stops = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        let solution = optimizer.optimize(&stops).unwrap();
        assert!(is_valid_permutation(&solution.order, 2));
        assert!((solution.length - 5.0).abs() < 1e-10);
    }

    // ---- Core scenarios ----

    #[test]
    fn test_unit_square_open_perimeter() {
        let optimizer = RouteOptimizer::new(quick_config(42));
        let solution = optimizer.optimize(&unit_square()).unwrap();

        assert!(is_valid_permutation(&solution.order, 4));
        // Three sides of the square, never a crossing diagonal.
        assert!(
            (solution.length - 3.0).abs() < 1e-10,
            "expected perimeter walk of 3.0, got {} via {:?}",
            solution.length,
            solution.order
        );
    }

    #[test]
    fn test_repeated_point_zero_length() {
        let optimizer = RouteOptimizer::new(quick_config(42));
        let stops = vec![Point::new(12.9, 77.6); 5];
        let solution = optimizer.optimize(&stops).unwrap();
        assert!(is_valid_permutation(&solution.order, 5));
        assert_eq!(solution.length, 0.0);
    }

    #[test]
    fn test_returns_valid_permutation() {
        let optimizer = RouteOptimizer::new(quick_config(7));
        let stops: Vec<Point> = (0..15)
            .map(|i| Point::new((i * 13 % 7) as f64, (i * 29 % 11) as f64))
            .collect();
        let solution = optimizer.optimize(&stops).unwrap();
        assert!(is_valid_permutation(&solution.order, 15));
        assert!(solution.degraded.is_none());
        assert!(!solution.cancelled);
    }

    #[test]
    fn test_beats_nearest_neighbor_baseline() {
        // Collinear stops with the greedy walk started mid-line: nearest
        // neighbor sweeps one side, then pays the full hop back for the
        // other (length 14 here vs the optimal 9). The evolver must do no
        // worse.
        let stops: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 0.0)).collect();
        let matrix = DistanceMatrix::from_points(&stops).unwrap();
        let baseline = matrix.path_length(&matrix.nearest_neighbor_tour(5));
        assert!((baseline - 14.0).abs() < 1e-10);

        let optimizer = RouteOptimizer::new(quick_config(42));
        let solution = optimizer.optimize(&stops).unwrap();
        assert!(
            solution.length <= baseline + 1e-9,
            "evolver ({}) worse than nearest neighbor ({baseline})",
            solution.length
        );
    }

    // ---- Determinism ----

    #[test]
    fn test_seeded_runs_are_deterministic() {
        let stops = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(5.0, 0.5),
            Point::new(1.0, 4.0),
            Point::new(3.0, 3.0),
            Point::new(0.5, 2.5),
        ];
        let a = RouteOptimizer::new(quick_config(99)).optimize(&stops).unwrap();
        let b = RouteOptimizer::new(quick_config(99)).optimize(&stops).unwrap();
        assert_eq!(a.order, b.order);
        assert_eq!(a.length, b.length);
    }

    #[test]
    fn test_unseeded_run_still_valid() {
        let config = OptimizerConfig::default()
            .with_population_bounds(20, 40)
            .with_generation_bounds(30, 60)
            .with_elite_count(4)
            .with_parent_pool(10);
        assert!(config.seed.is_none());
        let solution = RouteOptimizer::new(config)
            .optimize(&unit_square())
            .unwrap();
        assert!(is_valid_permutation(&solution.order, 4));
        assert!((solution.length - 3.0).abs() < 1e-10);
    }

    // ---- Failure semantics ----

    #[test]
    fn test_rejects_non_finite_input() {
        let optimizer = RouteOptimizer::new(quick_config(42));
        let stops = vec![
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 1.0),
            Point::new(1.0, 1.0),
        ];
        let err = optimizer.optimize(&stops).unwrap_err();
        assert!(matches!(err, RouteError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = OptimizerConfig::default().with_parent_pool(0);
        let err = RouteOptimizer::new(config)
            .optimize(&unit_square())
            .unwrap_err();
        assert!(matches!(err, RouteError::InvalidInput(_)));
    }

    // ---- Progress and cancellation ----

    #[test]
    fn test_progress_is_monotonic_and_complete() {
        let optimizer = RouteOptimizer::new(quick_config(42));
        let mut fractions = Vec::new();
        let solution = optimizer
            .optimize_with(&unit_square(), None, |p| fractions.push(p))
            .unwrap();

        assert_eq!(fractions.len(), solution.generations);
        assert!(fractions.windows(2).all(|w| w[0] < w[1]));
        assert!((fractions.last().copied().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cancellation_before_first_generation() {
        let optimizer = RouteOptimizer::new(quick_config(42));
        let cancel = Arc::new(AtomicBool::new(true));
        let solution = optimizer
            .optimize_with(&unit_square(), Some(cancel), |_| {})
            .unwrap();

        assert!(solution.cancelled);
        assert_eq!(solution.generations, 0);
        // Initial 2-opt-refined population still yields a valid tour.
        assert!(is_valid_permutation(&solution.order, 4));
    }

    #[test]
    fn test_cancellation_mid_run() {
        let optimizer = RouteOptimizer::new(quick_config(42));
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let mut seen = 0usize;
        let solution = optimizer
            .optimize_with(&unit_square(), Some(cancel), |_| {
                seen += 1;
                if seen == 3 {
                    flag.store(true, Ordering::Relaxed);
                }
            })
            .unwrap();

        assert!(solution.cancelled);
        assert_eq!(solution.generations, 3);
        assert!(is_valid_permutation(&solution.order, 4));
    }

    // ---- Panic payload extraction ----

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static payload");
        assert_eq!(panic_message(boxed.as_ref()), "static payload");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned payload"));
        assert_eq!(panic_message(boxed.as_ref()), "owned payload");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(17u32);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
