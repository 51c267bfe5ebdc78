//! Distance and elapsed-time evaluation of a flat route plan.

use serde::{Deserialize, Serialize};

use crate::config::CostParameters;
use crate::distance::Location;
use crate::solution::{Plan, PlanStop};

/// Aggregate figures of an evaluated plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanCost {
    pub distance: f64,
    /// Hours, travel plus dwell
    pub time: f64,
    pub deliveries: usize,
    pub refills: usize,
}

/// Evaluates plans against a depot and cost parameters.
#[derive(Debug, Clone, Copy)]
pub struct CostModel {
    pub depot: Location,
    pub params: CostParameters,
}

impl CostModel {
    pub fn new(depot: Location, params: CostParameters) -> Self {
        CostModel { depot, params }
    }

    /// Total distance of the flat plan, including the final return to the depot.
    ///
    /// A refill marker sends the cursor back to the depot; nothing is added
    /// when it is already there.
    pub fn total_distance(&self, stops: &[PlanStop]) -> f64 {
        let mut total = 0.0;
        let mut cursor = self.depot;

        for stop in stops {
            match stop {
                PlanStop::Refill { .. } => {
                    if cursor != self.depot {
                        total += cursor.distance(&self.depot);
                        cursor = self.depot;
                    }
                }
                PlanStop::Delivery { location, .. } => {
                    total += cursor.distance(location);
                    cursor = *location;
                }
            }
        }

        total + cursor.distance(&self.depot)
    }

    /// Total hours: travel at the configured speed plus dwell at every delivery.
    pub fn total_time(&self, stops: &[PlanStop]) -> f64 {
        self.time_for(self.total_distance(stops), count_deliveries(stops))
    }

    /// Evaluate every figure of a plan at once.
    pub fn evaluate(&self, plan: &Plan) -> PlanCost {
        let stops = plan.stops();
        let distance = self.total_distance(&stops);
        let deliveries = count_deliveries(&stops);

        PlanCost {
            distance,
            time: self.time_for(distance, deliveries),
            deliveries,
            refills: plan.refill_count(),
        }
    }

    fn time_for(&self, distance: f64, deliveries: usize) -> f64 {
        distance / self.params.speed + (deliveries as f64 * self.params.dwell_minutes) / 60.0
    }
}

fn count_deliveries(stops: &[PlanStop]) -> usize {
    stops.iter().filter(|s| s.is_delivery()).count()
}
