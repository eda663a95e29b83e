//! Permutation operators for the evolver.
//!
//! All operators work on `&[usize]` tours and preserve permutation validity:
//! every index appears exactly once in every output.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniformly random permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Ordered crossover for open tours.
///
/// Picks two distinct cut points `a < b` within `[0, n)`. The child is
/// parent1's segment `[a..b)` verbatim, followed by every gene of parent2
/// absent from that segment, in parent2's original relative order. The result
/// is always a valid permutation.
///
/// # Panics
///
/// Panics if the parents have different lengths.
pub fn ordered_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (a, b) = distinct_pair(n, rng);

    let mut in_segment = vec![false; n];
    for &gene in &parent1[a..b] {
        in_segment[gene] = true;
    }

    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&parent1[a..b]);
    child.extend(parent2.iter().copied().filter(|&gene| !in_segment[gene]));
    child
}

/// Swap mutation: exchange two distinct random positions.
pub fn swap_mutation<R: Rng>(tour: &mut [usize], rng: &mut R) {
    let n = tour.len();
    if n < 2 {
        return;
    }
    let (i, j) = distinct_pair(n, rng);
    tour.swap(i, j);
}

/// Two distinct values in `0..n`, returned in ascending order.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.random_range(0..n);
    let mut second = rng.random_range(0..n - 1);
    if second >= first {
        second += 1;
    }
    if first < second {
        (first, second)
    } else {
        (second, first)
    }
}
