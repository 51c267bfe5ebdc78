//! Error types shared by the planner and its loaders.

use thiserror::Error;

use crate::problem::{ItemId, TargetId};

/// Failures reported by planning operations and the file collaborators.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Targets whose own single-unit demand exceeds the capacity limits.
    #[error("unroutable targets, demand alone exceeds capacity: {ids:?}")]
    InfeasibleTargets { ids: Vec<TargetId> },

    /// A target demands an item missing from the catalog (strict mode only).
    #[error("target {target} demands unknown catalog item {item}")]
    UnknownCatalogItem { target: TargetId, item: ItemId },

    #[error("duplicate target id {0}")]
    DuplicateTarget(TargetId),

    #[error("target {target} has invalid coordinates ({latitude}, {longitude})")]
    InvalidLocation {
        target: TargetId,
        latitude: f64,
        longitude: f64,
    },

    #[error("duplicate catalog item id {0}")]
    DuplicateItem(ItemId),

    #[error("catalog item {id} has invalid weight {weight} or volume {volume}")]
    InvalidItem { id: ItemId, weight: f64, volume: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to format output: {0}")]
    Format(String),
}

/// Alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, PlanError>;
