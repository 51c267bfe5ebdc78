//! Trips, plans and the flat stop sequence used for costing and export.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capacity::{demand_for, Demand};
use crate::distance::Location;
use crate::problem::{ItemId, Target, TargetId};

/// One capacity-bounded round trip from the depot.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Stops in visiting order
    pub stops: Vec<Target>,
    /// Units of each item loaded at the start of the trip
    pub demand: Demand,
}

impl Trip {
    /// Create a trip from its stops, deriving the demand.
    pub fn new(stops: Vec<Target>) -> Self {
        let demand = demand_for(&stops);
        Trip { stops, demand }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn target_ids(&self) -> Vec<TargetId> {
        self.stops.iter().map(|t| t.id).collect()
    }
}

/// Quantity of one item loaded during a refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefillItem {
    pub item: ItemId,
    pub pieces: u32,
}

/// An entry of the flat route plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStop {
    /// Return to the depot and load the items for the next trip.
    Refill { items: Vec<RefillItem> },
    /// Deliver to a target.
    Delivery { target: TargetId, location: Location },
}

impl PlanStop {
    pub fn is_delivery(&self) -> bool {
        matches!(self, PlanStop::Delivery { .. })
    }
}

/// The full ordered collection of trips.
#[derive(Clone, Default, PartialEq)]
pub struct Plan {
    pub trips: Vec<Trip>,
    /// Targets left out because they can never fit a single trip.
    pub unroutable: Vec<TargetId>,
}

impl Plan {
    /// Create a plan from routed trips.
    pub fn new(trips: Vec<Trip>) -> Self {
        Plan {
            trips,
            unroutable: Vec::new(),
        }
    }

    /// Flatten the plan: a refill marker before each trip followed by its deliveries.
    pub fn stops(&self) -> Vec<PlanStop> {
        let mut stops = Vec::with_capacity(self.delivery_count() + self.trips.len());

        for trip in &self.trips {
            stops.push(PlanStop::Refill {
                items: trip
                    .demand
                    .iter()
                    .map(|(&item, &pieces)| RefillItem { item, pieces })
                    .collect(),
            });
            stops.extend(trip.stops.iter().map(|t| PlanStop::Delivery {
                target: t.id,
                location: t.location,
            }));
        }

        stops
    }

    /// Number of delivery stops.
    pub fn delivery_count(&self) -> usize {
        self.trips.iter().map(Trip::len).sum()
    }

    /// Number of refill events, one per trip.
    pub fn refill_count(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

impl fmt::Debug for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan:")?;
        writeln!(f, "  Trips: {}", self.trips.len())?;
        writeln!(f, "  Deliveries: {}", self.delivery_count())?;

        for (i, trip) in self.trips.iter().enumerate() {
            writeln!(f, "  Trip {}: {:?} (Load: {:?})", i, trip.target_ids(), trip.demand)?;
        }

        if !self.unroutable.is_empty() {
            writeln!(f, "  Unroutable: {:?}", self.unroutable)?;
        }

        Ok(())
    }
}
