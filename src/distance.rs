//! Great-circle distances and the nearest-neighbor primitive built on them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Radius of the sphere used for all distances.
pub const EARTH_RADIUS: f64 = 6371.0;

/// A point given as latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Location {
            latitude,
            longitude,
        }
    }

    /// The North Pole, the default depot.
    pub fn north_pole() -> Self {
        Location::new(90.0, 0.0)
    }

    /// Calculate the great-circle distance to another location.
    pub fn distance(&self, other: &Location) -> f64 {
        haversine(self, other)
    }

    /// Check that both coordinates lie within their degree ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Haversine distance between two points on a sphere of radius [`EARTH_RADIUS`].
///
/// Identical points yield exactly zero and antipodal points yield `π·R`.
pub fn haversine(p1: &Location, p2: &Location) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (p2.longitude - p1.longitude).to_radians();

    let s_lat = (d_lat / 2.0).sin();
    let s_lon = (d_lon / 2.0).sin();
    // Rounding can push `a` marginally past 1 for antipodes.
    let a = (s_lat * s_lat + lat1.cos() * lat2.cos() * s_lon * s_lon).clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS * c
}

/// Order two `(distance, id)` pairs: nearer first, then lower id.
pub(crate) fn by_distance_then_id(a: (f64, u64), b: (f64, u64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Find the entry of `points` nearest to `cursor`.
///
/// Returns the index into `points` together with its distance. Equal
/// distances resolve to the smallest identifier so repeated runs agree.
pub fn nearest<T, F>(cursor: &Location, points: &[T], key: F) -> Option<(usize, f64)>
where
    F: Fn(&T) -> (u64, Location),
{
    points
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let (id, location) = key(point);
            (idx, id, cursor.distance(&location))
        })
        .min_by(|a, b| by_distance_then_id((a.2, a.1), (b.2, b.1)))
        .map(|(idx, _, dist)| (idx, dist))
}
