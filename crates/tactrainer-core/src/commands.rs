//! Operator commands sent from the interaction layer to the simulation.
//!
//! Commands are queued and applied atomically at the next tick boundary.
//! A rejected command leaves the world untouched.

use serde::{Deserialize, Serialize};

use crate::components::{AssetId, DatalinkState, Transponder};
use crate::detections::ShapeGeometry;
use crate::enums::*;
use crate::error::CommandError;
use crate::geo;
use crate::types::GeoPoint;

/// A position typed by the operator: decimal degrees or DMM text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PositionInput {
    Point(GeoPoint),
    Dmm(String),
}

/// Everything needed to place a new asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAsset {
    pub name: String,
    pub category: Category,
    pub domain: Domain,
    #[serde(default)]
    pub platform: Option<String>,
    pub position: PositionInput,
    #[serde(default)]
    pub heading: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub transponder: Transponder,
}

/// Runtime-adjustable sensor and datalink settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "snake_case")]
pub enum SensorParameter {
    /// Age in seconds at which radar and IFF returns are purged.
    ReturnDecaySecs(f64),
    /// Datalink network id this ownship participates on.
    DatalinkNetwork(Option<String>),
    /// Reserved track-number range; resets the next-number counter.
    TrackBlock { start: u32, end: u32 },
}

/// All possible operator actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    // --- Simulation control ---
    Pause,
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    /// Reset the world to the scenario the engine was started or loaded with.
    Restart,

    // --- Assets ---
    CreateAsset { asset: NewAsset },
    DeleteAsset { asset_id: AssetId },
    MoveAsset { asset_id: AssetId, position: PositionInput },
    RenameAsset { asset_id: AssetId, name: String },
    SetCategory { asset_id: AssetId, category: Category },
    SetTarget { asset_id: AssetId, field: TargetField, value: f64 },
    SetTransponder { asset_id: AssetId, transponder: Transponder },
    /// Set an asset's datalink fields. The `active` flag is engine-owned and ignored.
    SetAssetDatalink { asset_id: AssetId, datalink: DatalinkState },
    SetEmitter { asset_id: AssetId, emitter: String, active: bool },

    // --- Waypoints ---
    /// Insert at `index`, or append when `index` is absent.
    AddWaypoint {
        asset_id: AssetId,
        #[serde(default)]
        index: Option<usize>,
        position: PositionInput,
    },
    DeleteWaypoint { asset_id: AssetId, index: usize },
    MoveWaypoint { asset_id: AssetId, index: usize, position: PositionInput },
    ClearWaypoints { asset_id: AssetId },

    // --- Weapons and sensors ---
    Fire { firer: AssetId, target: AssetId, category: WeaponCategory },
    /// Drop a buoy at `position`, or under the ownship when absent.
    DeployBuoy {
        #[serde(default)]
        position: Option<PositionInput>,
    },
    ToggleSystem { system: SystemKind },
    SetSensorParameter { parameter: SensorParameter },
    SetEsmVisibility { serial: u32, visible: bool },
    ReportTrack { asset_id: AssetId },

    // --- Map annotations ---
    SetBullseye {
        position: PositionInput,
        #[serde(default)]
        name: Option<String>,
    },
    CreateGeoPoint { name: String, position: PositionInput },
    DeleteGeoPoint { id: u32 },
    MoveGeoPoint { id: u32, position: PositionInput },
    CreateShape { name: String, geometry: ShapeGeometry },
    DeleteShape { id: u32 },
    MoveShape { id: u32, position: PositionInput },
    /// Bearing line from the current ownship position.
    CreateBearingLine { bearing: f64 },
    DeleteBearingLine { serial: u32 },
    MoveBearingLine { serial: u32, position: PositionInput },

    // --- Persistence ---
    SaveScenario { path: String },
    LoadScenario { path: String },
}

impl PositionInput {
    /// Resolve to a valid point, parsing DMM text if needed.
    pub fn resolve(&self) -> Result<GeoPoint, CommandError> {
        let point = match self {
            PositionInput::Point(p) => *p,
            PositionInput::Dmm(text) => geo::parse_dmm(text)?,
        };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(CommandError::InvalidCoordinate(format!(
                "{}, {}",
                point.lat, point.lon
            )))
        }
    }
}

impl From<GeoPoint> for PositionInput {
    fn from(point: GeoPoint) -> Self {
        PositionInput::Point(point)
    }
}
