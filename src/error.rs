//! Error types for route optimization.
//!
//! Two kinds with asymmetric propagation: [`RouteError::InvalidInput`] fails
//! fast before any computation starts, while [`RouteError::Optimization`] is
//! recovered internally — the optimizer returns the identity ordering and
//! attaches the diagnostic to the solution instead of propagating.

use thiserror::Error;

/// Errors surfaced by the route optimizer.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RouteError {
    /// Malformed input: a coordinate with a non-finite component, or an
    /// invalid configuration. The caller must fix the input; nothing was
    /// computed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure during evolution. Never returned from
    /// [`optimize`](crate::optimizer::RouteOptimizer::optimize); carried on
    /// [`RouteSolution::degraded`](crate::optimizer::RouteSolution) after the
    /// optimizer falls back to the identity ordering.
    #[error("route optimization failed: {0}")]
    Optimization(String),
}

impl RouteError {
    /// Input error for a single malformed coordinate.
    pub(crate) fn bad_coordinate(index: usize, reason: &str) -> Self {
        RouteError::InvalidInput(format!("coordinate {index}: {reason}"))
    }
}
