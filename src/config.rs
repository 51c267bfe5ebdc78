//! Run parameters for the planner.

use serde::{Deserialize, Serialize};

use crate::distance::Location;
use crate::error::{PlanError, Result};

/// Maximum total weight and volume a single trip may carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityLimits {
    pub max_weight: f64,
    pub max_volume: f64,
}

impl CapacityLimits {
    pub fn new(max_weight: f64, max_volume: f64) -> Self {
        CapacityLimits {
            max_weight,
            max_volume,
        }
    }
}

impl Default for CapacityLimits {
    fn default() -> Self {
        CapacityLimits::new(f64::MAX, f64::MAX)
    }
}

/// Travel speed and dwell time used to turn distance into elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostParameters {
    /// Distance units per hour.
    pub speed: f64,
    /// Minutes spent at every delivery stop.
    pub dwell_minutes: f64,
}

impl CostParameters {
    pub fn new(speed: f64, dwell_minutes: f64) -> Self {
        CostParameters {
            speed,
            dwell_minutes,
        }
    }
}

impl Default for CostParameters {
    fn default() -> Self {
        CostParameters::new(1.0, 0.0)
    }
}

/// Configuration settings for a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capacity of the vehicle on every trip
    pub limits: CapacityLimits,
    /// Speed and per-stop dwell time
    pub cost: CostParameters,
    /// Origin and return point of every trip
    pub depot: Location,
    /// Fail on targets demanding items missing from the catalog
    pub strict_catalog: bool,
    /// Fail instead of excluding targets that can never fit a trip
    pub reject_unroutable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            limits: CapacityLimits::default(),
            cost: CostParameters::default(),
            depot: Location::north_pole(),
            strict_catalog: false,
            reject_unroutable: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the capacity limits.
    pub fn with_limits(mut self, max_weight: f64, max_volume: f64) -> Self {
        self.limits = CapacityLimits::new(max_weight, max_volume);
        self
    }

    /// Set the travel speed in distance units per hour.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.cost.speed = speed;
        self
    }

    /// Set the dwell time per delivery stop in minutes.
    pub fn with_dwell_minutes(mut self, minutes: f64) -> Self {
        self.cost.dwell_minutes = minutes;
        self
    }

    /// Set the depot location.
    pub fn with_depot(mut self, depot: Location) -> Self {
        self.depot = depot;
        self
    }

    /// Treat unknown catalog items as errors.
    pub fn with_strict_catalog(mut self, strict: bool) -> Self {
        self.strict_catalog = strict;
        self
    }

    /// Fail the run when any target can never be placed.
    pub fn with_reject_unroutable(mut self, reject: bool) -> Self {
        self.reject_unroutable = reject;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(PlanError::InvalidConfig(msg)) };

        let negative = |v: f64| v.is_nan() || v < 0.0;
        if negative(self.limits.max_weight) || negative(self.limits.max_volume) {
            return invalid(format!(
                "capacity limits must be non-negative, got weight {} and volume {}",
                self.limits.max_weight, self.limits.max_volume
            ));
        }
        if !self.cost.speed.is_finite() || self.cost.speed <= 0.0 {
            return invalid(format!("speed must be positive, got {}", self.cost.speed));
        }
        if !self.cost.dwell_minutes.is_finite() || self.cost.dwell_minutes < 0.0 {
            return invalid(format!(
                "dwell time must be non-negative, got {}",
                self.cost.dwell_minutes
            ));
        }
        if !self.depot.is_valid() {
            return invalid(format!("depot out of range: {:?}", self.depot));
        }

        Ok(())
    }
}
