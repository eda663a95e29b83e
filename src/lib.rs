//! Sales-beat route optimization.
//!
//! Computes an efficient visit order for the retail outlets of a sales beat:
//! given the outlets' coordinates, returns a permutation of their indices
//! approximating the shortest open path that visits each outlet once. The
//! caller re-attaches the permutation to its outlet records; this crate never
//! touches storage, UI, or maps.
//!
//! The optimizer is a hybrid of two heuristics:
//!
//! - **Genetic population evolver**: a population of candidate tours is
//!   ranked by length each generation and rebred via ordered crossover and
//!   swap mutation, with elitism.
//! - **Windowed 2-opt local search**: every tour entering the population is
//!   first settled to a local optimum by bounded-look-ahead edge reversal.
//!
//! Search distances are planar Euclidean over a matrix built once per run;
//! user-facing distances are geodesic ([`geo::route_distance_km`]). The two
//! metrics are deliberately different: cheap where the optimizer iterates
//! millions of times, accurate where a person reads the number.
//!
//! # Example
//!
//! ```
//! use beat_route::geo::{self, Point};
//! use beat_route::optimizer::{OptimizerConfig, RouteOptimizer};
//!
//! let outlets = vec![
//!     Point::new(12.9716, 77.5946),
//!     Point::new(12.9352, 77.6245),
//!     Point::new(12.9784, 77.6408),
//! ];
//!
//! let optimizer = RouteOptimizer::new(OptimizerConfig::default().with_seed(7));
//! let solution = optimizer.optimize(&outlets).unwrap();
//!
//! let ordered: Vec<Point> = solution.order.iter().map(|&i| outlets[i]).collect();
//! let km = geo::route_distance_km(&ordered);
//! assert!(km > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`geo`]: points, validity screening, Euclidean and geodesic metrics
//! - [`distance`]: dense pairwise distance matrix
//! - [`local_search`]: windowed 2-opt improvement
//! - [`optimizer`]: configuration, evolutionary loop, result types
//! - [`cache`]: optional content-keyed result memoization
//! - [`error`]: input and optimization error kinds

pub mod cache;
pub mod distance;
pub mod error;
pub mod geo;
pub mod local_search;
pub mod optimizer;
