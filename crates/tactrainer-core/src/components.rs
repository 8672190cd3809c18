//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::GeoPoint;

/// Stable asset identifier. Survives save/load; hecs entities do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u32);

/// Stable munition identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(pub u32);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity and platform reference of an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
    pub category: Category,
    pub domain: Domain,
    /// Platform catalog key (if any).
    pub platform: Option<String>,
    /// Track number shown on the display.
    pub track_number: Option<u32>,
}

/// Current motion state. Shared by assets and munitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: GeoPoint,
    /// Degrees true, 0..360.
    pub heading: f64,
    /// Knots.
    pub speed: f64,
    /// Feet (air only).
    pub altitude: f64,
    /// Feet (subsurface only).
    pub depth: f64,
}

/// Commanded targets; each is cleared once reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Commanded {
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    pub altitude: Option<f64>,
    pub depth: Option<f64>,
}

/// Ordered route; index 0 is the next waypoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaypointQueue {
    pub points: VecDeque<GeoPoint>,
}

/// Cooperative transponder state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transponder {
    pub squawk: bool,
    pub mode1: Option<String>,
    pub mode2: Option<String>,
    pub mode3: Option<String>,
}

/// Per-asset datalink enrolment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatalinkState {
    pub network_id: Option<String>,
    /// Five-digit unit code.
    pub unit_code: Option<String>,
    pub track_block_start: Option<u32>,
    pub track_block_end: Option<u32>,
    pub active: bool,
}

/// Emitter name -> radiating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emitters {
    pub states: BTreeMap<String, bool>,
}

/// Marks the single ownship entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OwnShip;

/// Ownship magazine: rounds remaining per weapon category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponInventory {
    pub counts: BTreeMap<WeaponCategory, u32>,
}

/// In-flight munition state. Position lives in the entity's `Kinematics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Munition {
    pub id: WeaponId,
    pub category: WeaponCategory,
    /// Weapon catalog key.
    pub variant: String,
    pub target: AssetId,
    pub firer: AssetId,
    pub affiliation: Affiliation,
    /// Elapsed seconds at launch.
    pub launch_time: f64,
}

/// A deployed passive sonobuoy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sonobuoy {
    pub id: u32,
    pub position: GeoPoint,
    /// Elapsed seconds at deployment.
    pub deploy_time: f64,
}
