//! Optimizer configuration.
//!
//! [`OptimizerConfig`] names every constant that shapes runtime behavior.
//! The defaults reproduce the tuning the optimizer shipped with; overriding
//! them changes the speed/quality tradeoff, not correctness.

/// Default 2-opt look-ahead window.
pub const DEFAULT_TWO_OPT_WINDOW: usize = 15;

/// Configuration for the route optimizer.
///
/// Population size, generation count, and mutation rate are derived from the
/// problem size `n` at run time, clamped into the configured bounds:
///
/// - population: `clamp(n * 2, min_population, max_population)`
/// - generations: `clamp(n * 5, min_generations, max_generations)`
/// - mutation rate: `clamp(0.5 / n, min_mutation_rate, max_mutation_rate)`
///
/// # Examples
///
/// ```
/// use beat_route::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::default();
/// assert_eq!(config.two_opt_window, 15);
/// assert_eq!(config.population_size(30), 60);
/// assert_eq!(config.population_size(500), 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use beat_route::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_two_opt_window(25)
///     .with_generation_bounds(50, 400)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizerConfig {
    /// Look-ahead window of the 2-opt local search.
    ///
    /// Bounds each improvement pass at O(n·window) instead of O(n²).
    /// Larger windows find more crossings per pass and run slower.
    pub two_opt_window: usize,

    /// Lower bound on the derived population size.
    pub min_population: usize,

    /// Upper bound on the derived population size.
    pub max_population: usize,

    /// Lower bound on the derived generation count.
    pub min_generations: usize,

    /// Upper bound on the derived generation count.
    pub max_generations: usize,

    /// Lower bound on the derived mutation rate.
    pub min_mutation_rate: f64,

    /// Upper bound on the derived mutation rate.
    pub max_mutation_rate: f64,

    /// Number of best individuals copied unchanged into each next generation.
    pub elite_count: usize,

    /// Number of top-ranked individuals parents are drawn from.
    ///
    /// Sampling is uniform with replacement; a parent may pair with itself.
    pub parent_pool: usize,

    /// Random seed for reproducibility. `None` draws a seed from entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            two_opt_window: DEFAULT_TWO_OPT_WINDOW,
            min_population: 50,
            max_population: 200,
            min_generations: 100,
            max_generations: 1000,
            min_mutation_rate: 0.01,
            max_mutation_rate: 0.1,
            elite_count: 10,
            parent_pool: 50,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Sets the 2-opt look-ahead window.
    pub fn with_two_opt_window(mut self, window: usize) -> Self {
        self.two_opt_window = window;
        self
    }

    /// Sets the population clamp bounds.
    pub fn with_population_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_population = min;
        self.max_population = max;
        self
    }

    /// Sets the generation clamp bounds.
    pub fn with_generation_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_generations = min;
        self.max_generations = max;
        self
    }

    /// Sets the mutation rate clamp bounds.
    pub fn with_mutation_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_mutation_rate = min;
        self.max_mutation_rate = max;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the parent pool size.
    pub fn with_parent_pool(mut self, n: usize) -> Self {
        self.parent_pool = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Population size for a problem with `n` stops.
    pub fn population_size(&self, n: usize) -> usize {
        (n * 2).clamp(self.min_population, self.max_population)
    }

    /// Generation count for a problem with `n` stops.
    pub fn generations(&self, n: usize) -> usize {
        (n * 5).clamp(self.min_generations, self.max_generations)
    }

    /// Mutation rate for a problem with `n` stops.
    pub fn mutation_rate(&self, n: usize) -> f64 {
        (0.5 / n as f64).clamp(self.min_mutation_rate, self.max_mutation_rate)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.two_opt_window < 3 {
            return Err("two_opt_window must be at least 3".into());
        }
        if self.min_population == 0 {
            return Err("min_population must be at least 1".into());
        }
        if self.min_population > self.max_population {
            return Err("min_population exceeds max_population".into());
        }
        if self.min_generations == 0 {
            return Err("min_generations must be at least 1".into());
        }
        if self.min_generations > self.max_generations {
            return Err("min_generations exceeds max_generations".into());
        }
        if !(0.0..=1.0).contains(&self.min_mutation_rate)
            || !(0.0..=1.0).contains(&self.max_mutation_rate)
        {
            return Err("mutation rate bounds must be within [0, 1]".into());
        }
        if self.min_mutation_rate > self.max_mutation_rate {
            return Err("min_mutation_rate exceeds max_mutation_rate".into());
        }
        if self.elite_count >= self.min_population {
            return Err("elite_count must be below min_population".into());
        }
        if self.parent_pool == 0 {
            return Err("parent_pool must be at least 1".into());
        }
        Ok(())
    }
}
