//! Nearest-neighbor ordering of the stops within a trip.

use crate::distance::{nearest, Location};
use crate::problem::Target;
use crate::solution::Trip;

/// Orders the stops of a formed trip; membership and load are untouched.
pub struct RouteSequencer;

impl RouteSequencer {
    /// Visit order for `trip`, starting from `depot` and always moving to the
    /// closest unvisited stop (ties by ascending id).
    pub fn sequence(trip: &Trip, depot: &Location) -> Vec<Target> {
        let mut remaining: Vec<&Target> = trip.stops.iter().collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut cursor = *depot;

        while let Some((idx, _)) = nearest(&cursor, &remaining, |t| (t.id, t.location)) {
            let target = remaining.remove(idx);
            cursor = target.location;
            ordered.push(target.clone());
        }

        ordered
    }

    /// Reorder a trip in place.
    pub fn sequence_trip(trip: &mut Trip, depot: &Location) {
        trip.stops = Self::sequence(trip, depot);
    }
}
