//! Geographic points and distance metrics.
//!
//! Two metrics coexist on purpose. During optimization, coordinates are
//! treated as planar and distances are Euclidean — a cheap proxy that is
//! accurate enough at beat scale (a few kilometers). Final distances reported
//! to the user are great-circle (haversine). Collapsing the two into one
//! metric changes either runtime or reported numbers; both are load-bearing.

/// Mean Earth radius (IUGG) in kilometers.
const EARTH_RADIUS_KM: f64 = 6_371.0088;

/// Geographic point in degrees, also usable as a plain planar coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar Euclidean distance, coordinates taken as-is.
    ///
    /// This is the optimizer's search metric. No great-circle correction.
    pub fn euclidean(self, rhs: Point) -> f64 {
        let dlat = self.lat - rhs.lat;
        let dlng = self.lng - rhs.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Great-circle distance in kilometers (haversine).
    pub fn haversine_km(self, rhs: Point) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), rhs.lat.to_radians());
        let dlat = (rhs.lat - self.lat).to_radians();
        let dlng = (rhs.lng - self.lng).to_radians();
        let s1 = (dlat / 2.0).sin();
        let s2 = (dlng / 2.0).sin();
        let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }

    /// Both components are finite. The minimum the optimizer requires.
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Finite and inside the WGS-84 degree ranges.
    ///
    /// Stricter than [`is_finite`](Self::is_finite): projected planar inputs
    /// may legitimately fail this while remaining optimizable.
    pub fn is_valid(self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Indices of points that pass the outlet data screen: valid degree ranges
/// and not the `(0, 0)` placeholder that unmapped outlets carry.
///
/// Advisory pre-filter for callers feeding raw outlet exports; the optimizer
/// itself only requires finite components.
pub fn screen_points(points: &[Point]) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_valid() && !(p.lat == 0.0 && p.lng == 0.0))
        .map(|(i, _)| i)
        .collect()
}

/// Total haversine distance in kilometers along an already-ordered sequence
/// of stops.
///
/// Reporting metric only — the optimizer never sees this. Open path: no
/// closing leg back to the first stop.
pub fn route_distance_km(stops: &[Point]) -> f64 {
    stops.windows(2).map(|w| w[0].haversine_km(w[1])).sum()
}
