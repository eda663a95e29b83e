//! Windowed 2-opt local search.
//!
//! # Algorithm
//!
//! For each position `i`, candidate positions `j` within a bounded look-ahead
//! window are examined. The move removes edges `(t[i-1], t[i])` and
//! `(t[j-1], t[j])` and replaces them with `(t[i-1], t[j-1])` and
//! `(t[i], t[j])`:
//!
//! ```text
//! current   = d(t[i-1], t[i])   + d(t[j-1], t[j])
//! potential = d(t[i-1], t[j-1]) + d(t[i],   t[j])
//! ```
//!
//! If `potential < current`, the segment `t[i..j]` is reversed in place,
//! which realizes the new edge set. Passes repeat until one completes with
//! no improving move (first-improvement strategy).
//!
//! The window bounds each pass at O(n·w) instead of the O(n²) of full 2-opt,
//! trading local-optimum quality for interactive speed. Tours are open paths:
//! the leg back to the start never enters the length.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::DistanceMatrix;

/// Improves `tour` in place until no improving windowed move remains.
///
/// `window` is the look-ahead bound: for each `i`, candidates `j` range over
/// `i+2 .. min(n, i+window)`. Never increases the open-path length. Tours
/// with fewer than four stops have no interior move and are left untouched.
///
/// # Panics
///
/// Panics if `tour` references indices outside the matrix.
pub fn two_opt_improve(tour: &mut [usize], matrix: &DistanceMatrix, window: usize) {
    let n = tour.len();
    if n < 4 {
        return;
    }

    let mut improved = true;
    while improved {
        improved = false;
        for i in 1..n - 2 {
            for j in (i + 2)..n.min(i + window) {
                let a = tour[i - 1];
                let b = tour[i];
                let c = tour[j - 1];
                let d = tour[j % n];
                let current = matrix.get(a, b) + matrix.get(c, d);
                let potential = matrix.get(a, c) + matrix.get(b, d);
                if potential < current {
                    tour[i..j].reverse();
                    improved = true;
                }
            }
        }
    }
}
