//! Demand tallies and the capacity fit test.

use std::collections::BTreeMap;

use crate::config::CapacityLimits;
use crate::problem::{Catalog, ItemId, Target};

/// Units of each catalog item required, ordered by item id.
pub type Demand = BTreeMap<ItemId, u32>;

/// Total weight and volume of a demand.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Load {
    pub weight: f64,
    pub volume: f64,
}

impl Load {
    /// Check the load against the limits; both bounds are inclusive.
    pub fn within(&self, limits: &CapacityLimits) -> bool {
        self.weight <= limits.max_weight && self.volume <= limits.max_volume
    }
}

/// Tally one unit of demand per target.
pub fn demand_for<'a, I>(targets: I) -> Demand
where
    I: IntoIterator<Item = &'a Target>,
{
    let mut demand = Demand::new();
    for target in targets {
        *demand.entry(target.item).or_insert(0) += 1;
    }
    demand
}

/// Sum `count × weight` and `count × volume` over a demand.
///
/// Items missing from the catalog contribute nothing.
pub fn load_of(demand: &Demand, catalog: &Catalog) -> Load {
    demand
        .iter()
        .filter_map(|(&id, &count)| catalog.get(id).map(|item| (item, count as f64)))
        .fold(Load::default(), |load, (item, count)| Load {
            weight: load.weight + count * item.weight,
            volume: load.volume + count * item.volume,
        })
}

/// Check whether a demand fits within the capacity limits.
pub fn fits(demand: &Demand, catalog: &Catalog, limits: &CapacityLimits) -> bool {
    load_of(demand, catalog).within(limits)
}

/// Targets whose demanded item is absent from the catalog, in input order.
pub fn unknown_items<'a>(targets: &'a [Target], catalog: &Catalog) -> Vec<&'a Target> {
    targets
        .iter()
        .filter(|t| !catalog.contains(t.item))
        .collect()
}
