//! Greedy partitioning of targets into capacity-bounded trips.

use itertools::Itertools;
use log::debug;

use crate::capacity::{demand_for, fits, Demand};
use crate::config::Config;
use crate::distance::by_distance_then_id;
use crate::error::{PlanError, Result};
use crate::problem::{Catalog, Target, TargetId};
use crate::solution::Trip;

/// Builds trips by nearest-feasible expansion from the depot.
pub struct TripBuilder;

impl TripBuilder {
    /// Partition `targets` into trips.
    ///
    /// Each trip starts with the cursor at the depot. Remaining targets are
    /// ranked by distance from the cursor (ties by ascending id) and the first
    /// one whose demand still fits is added, moving the cursor to it. A trip
    /// closes once no remaining target fits. Stops are returned in the order
    /// they were added.
    ///
    /// Fails with [`PlanError::InfeasibleTargets`] as soon as a fresh trip
    /// cannot take any target, listing every remaining target that cannot fit
    /// on its own.
    pub fn build(targets: &[Target], catalog: &Catalog, config: &Config) -> Result<Vec<Trip>> {
        let mut remaining: Vec<&Target> = targets.iter().collect();
        let mut trips = Vec::new();

        while !remaining.is_empty() {
            let mut stops: Vec<Target> = Vec::new();
            let mut demand = Demand::new();
            let mut cursor = config.depot;

            loop {
                let chosen = remaining
                    .iter()
                    .enumerate()
                    .map(|(idx, t)| (idx, cursor.distance(&t.location), t.id))
                    .sorted_by(|a, b| by_distance_then_id((a.1, a.2), (b.1, b.2)))
                    .map(|(idx, _, _)| idx)
                    .find(|&idx| try_add(&mut demand, remaining[idx], catalog, config));

                match chosen {
                    Some(idx) => {
                        let target = remaining.remove(idx);
                        cursor = target.location;
                        stops.push(target.clone());
                    }
                    None => break,
                }
            }

            if stops.is_empty() {
                let owned: Vec<Target> = remaining.into_iter().cloned().collect();
                return Err(PlanError::InfeasibleTargets {
                    ids: Self::infeasible(&owned, catalog, config),
                });
            }

            debug!(
                "trip {} closed with {} stops, {} targets remaining",
                trips.len() + 1,
                stops.len(),
                remaining.len()
            );
            trips.push(Trip { stops, demand });
        }

        Ok(trips)
    }

    /// Ids of targets whose single-unit demand exceeds the limits, in input order.
    pub fn infeasible(targets: &[Target], catalog: &Catalog, config: &Config) -> Vec<TargetId> {
        targets
            .iter()
            .filter(|t| !fits(&demand_for([*t]), catalog, &config.limits))
            .map(|t| t.id)
            .collect()
    }

    /// Split targets into those that can be routed and the ids of those that never fit.
    pub fn partition(
        targets: &[Target],
        catalog: &Catalog,
        config: &Config,
    ) -> (Vec<Target>, Vec<TargetId>) {
        let (routable, unroutable): (Vec<&Target>, Vec<&Target>) = targets
            .iter()
            .partition(|t| fits(&demand_for([*t]), catalog, &config.limits));

        (
            routable.into_iter().cloned().collect(),
            unroutable.into_iter().map(|t| t.id).collect(),
        )
    }
}

/// Add one unit of the target's item to `demand` if the result still fits.
fn try_add(demand: &mut Demand, target: &Target, catalog: &Catalog, config: &Config) -> bool {
    *demand.entry(target.item).or_insert(0) += 1;
    if fits(demand, catalog, &config.limits) {
        return true;
    }

    if let Some(count) = demand.get_mut(&target.item) {
        *count -= 1;
        if *count == 0 {
            demand.remove(&target.item);
        }
    }
    false
}
