//! # Sleigh Planner
//!
//! Plans deliveries from a single depot with one capacity-bounded vehicle
//! making as many trips as needed. Every target demands one item from a
//! shared catalog; items have weight and volume, and each trip must stay
//! within both limits.
//!
//! Targets are grouped into trips greedily by nearest feasible expansion from
//! the depot, each trip is ordered by nearest neighbor, and the resulting plan
//! is costed with great-circle distances, a travel speed and a dwell time per
//! stop. The heuristic is deterministic: identical input yields an identical
//! plan.

pub mod capacity;
pub mod config;
pub mod cost;
pub mod distance;
pub mod error;
pub mod export;
pub mod problem;
pub mod sequencer;
pub mod solution;
pub mod trip_builder;

use log::{info, warn};

use crate::capacity::unknown_items;
use crate::config::Config;
use crate::cost::{CostModel, PlanCost};
use crate::error::{PlanError, Result};
use crate::problem::{Catalog, Target};
use crate::sequencer::RouteSequencer;
use crate::solution::Plan;
use crate::trip_builder::TripBuilder;

/// Orchestrates trip building, sequencing and costing for one run.
pub struct Planner {
    pub config: Config,
    pub catalog: Catalog,
}

impl Planner {
    /// Create a planner, validating the configuration.
    pub fn new(catalog: Catalog, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Planner { config, catalog })
    }

    /// Plan deliveries to `targets`, which must already be filtered to the
    /// eligible ones.
    ///
    /// Targets that can never fit a trip are excluded and listed in
    /// [`Plan::unroutable`], or rejected outright when
    /// `reject_unroutable` is set.
    pub fn plan(&self, targets: &[Target]) -> Result<Plan> {
        self.check_catalog(targets)?;

        let (routable, unroutable) = TripBuilder::partition(targets, &self.catalog, &self.config);
        if !unroutable.is_empty() {
            if self.config.reject_unroutable {
                return Err(PlanError::InfeasibleTargets { ids: unroutable });
            }
            warn!(
                "{} targets exceed capacity on their own and are left out: {:?}",
                unroutable.len(),
                unroutable
            );
        }

        let mut trips = TripBuilder::build(&routable, &self.catalog, &self.config)?;
        for trip in &mut trips {
            RouteSequencer::sequence_trip(trip, &self.config.depot);
        }

        info!(
            "generated {} trips to deliver to {} targets",
            trips.len(),
            routable.len()
        );

        let mut plan = Plan::new(trips);
        plan.unroutable = unroutable;
        Ok(plan)
    }

    /// Plan and evaluate in one step.
    pub fn solve(&self, targets: &[Target]) -> Result<(Plan, PlanCost)> {
        let plan = self.plan(targets)?;
        let cost = self.cost_model().evaluate(&plan);
        Ok((plan, cost))
    }

    pub fn cost_model(&self) -> CostModel {
        CostModel::new(self.config.depot, self.config.cost)
    }

    fn check_catalog(&self, targets: &[Target]) -> Result<()> {
        let unknown = unknown_items(targets, &self.catalog);
        if let (true, Some(first)) = (self.config.strict_catalog, unknown.first()) {
            return Err(PlanError::UnknownCatalogItem {
                target: first.id,
                item: first.item,
            });
        }

        for target in unknown {
            warn!(
                "target {} demands unknown item {}, counted as weightless",
                target.id, target.item
            );
        }
        Ok(())
    }
}
