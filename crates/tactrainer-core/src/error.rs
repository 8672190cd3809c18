//! Error types for commands, catalogs and scenario documents.
//!
//! None of these are fatal to the engine: a failed command leaves the world
//! untouched and is reported to the operator as an alert.

use thiserror::Error;

use crate::components::AssetId;
use crate::enums::{Domain, TargetField, WeaponCategory};

/// Why an operator command was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// Coordinate text could not be parsed or is off the globe.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    /// Ownship cannot be deleted, retyped, or reported.
    #[error("Operation not permitted on ownship: {0}")]
    OwnshipProtected(&'static str),

    #[error("{field:?} does not apply to {domain:?} assets")]
    FieldNotApplicable { field: TargetField, domain: Domain },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Waypoint index {index} out of range (queue length {len})")]
    WaypointIndex { index: usize, len: usize },

    #[error("No {category:?} weapon in loadout of asset {firer}")]
    NoWeaponVariant {
        firer: AssetId,
        category: WeaponCategory,
    },

    #[error("Target out of range: {range:.1} NM exceeds {max_range:.1} NM")]
    OutOfRange { range: f64, max_range: f64 },

    #[error("No {0:?} rounds remaining")]
    InventoryEmpty(WeaponCategory),

    #[error("Datalink is disabled")]
    DatalinkDisabled,

    #[error("Datalink network or track block not configured")]
    DatalinkNotConfigured,

    #[error("Track block exhausted at {end}")]
    TrackBlockExhausted { end: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Scenario rejected: {0}")]
    Scenario(String),
}

/// Catalog file failures. Callers degrade to an empty catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Scenario document failures. The current world is kept on any error.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to access scenario file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scenario document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unsupported scenario version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Invalid scenario content: {0}")]
    Invalid(String),
}

impl From<ScenarioError> for CommandError {
    fn from(err: ScenarioError) -> Self {
        CommandError::Scenario(err.to_string())
    }
}
