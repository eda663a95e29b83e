//! Hybrid genetic / 2-opt route optimizer.
//!
//! Maintains a population of candidate tours over a precomputed distance
//! matrix. Each generation is ranked by open-path length; elites survive
//! unchanged, the rest of the next generation is bred from top-ranked
//! parents by ordered crossover and swap mutation, and every offspring is
//! settled by the windowed 2-opt local search before joining the population.
//!
//! # Key Types
//!
//! - [`OptimizerConfig`]: named tuning constants (clamps, window, seed)
//! - [`RouteOptimizer`]: executes the evolutionary loop
//! - [`RouteSolution`]: final visit order with run statistics
//!
//! # Submodules
//!
//! - [`operators`]: permutation crossover and mutation primitives
//!
//! # References
//!
//! - Davis (1985), *Applying Adaptive Algorithms to Epistatic Domains*
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*

mod config;
pub mod operators;
mod runner;

pub use config::{OptimizerConfig, DEFAULT_TWO_OPT_WINDOW};
pub use runner::{RouteOptimizer, RouteSolution};
