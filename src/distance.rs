//! Dense pairwise distance matrix.
//!
//! Built once per optimization run from the input coordinates, then treated
//! as immutable. Symmetric with a zero diagonal.

use crate::error::RouteError;
use crate::geo::Point;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use beat_route::distance::DistanceMatrix;
/// use beat_route::geo::Point;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 4.0),
///     Point::new(6.0, 8.0),
/// ];
/// let matrix = DistanceMatrix::from_points(&points).unwrap();
/// assert!((matrix.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(matrix.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix for the given points.
    ///
    /// Fails only on malformed input: any point with a non-finite component
    /// yields [`RouteError::InvalidInput`] before anything is computed.
    pub fn from_points(points: &[Point]) -> Result<Self, RouteError> {
        for (i, p) in points.iter().enumerate() {
            if !p.lat.is_finite() {
                return Err(RouteError::bad_coordinate(i, "latitude is not finite"));
            }
            if !p.lng.is_finite() {
                return Err(RouteError::bad_coordinate(i, "longitude is not finite"));
            }
        }

        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = points[i].euclidean(points[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { data, size: n })
    }

    /// Returns the distance between points `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of points in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Total length of an open path visiting `order` front to back.
    ///
    /// The final leg back to the start is not included.
    pub fn path_length(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Greedy nearest-neighbor tour starting from `start`.
    ///
    /// Used as a construction baseline; ties broken by lowest index.
    ///
    /// # Panics
    ///
    /// Panics if `start` is out of bounds.
    pub fn nearest_neighbor_tour(&self, start: usize) -> Vec<usize> {
        let n = self.size;
        assert!(start < n, "start index {start} out of bounds for {n} points");

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        visited[start] = true;
        tour.push(start);

        let mut current = start;
        for _ in 1..n {
            let next = (0..n)
                .filter(|&j| !visited[j])
                .min_by(|&a, &b| {
                    self.get(current, a)
                        .partial_cmp(&self.get(current, b))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .expect("an unvisited point remains on every iteration");
            visited[next] = true;
            tour.push(next);
            current = next;
        }
        tour
    }
}
