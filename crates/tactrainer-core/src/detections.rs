//! Sensor detection records and operator-placed map annotations.
//!
//! These live in engine-owned collections, not as ECS entities, and are
//! copied into every snapshot.

use serde::{Deserialize, Serialize};

use crate::components::AssetId;
use crate::types::GeoPoint;

/// A radar paint. Ownship position is frozen at detection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarReturn {
    pub target: AssetId,
    pub target_position: GeoPoint,
    pub ownship_position: GeoPoint,
    pub bearing: f64,
    pub range: f64,
    pub created_tick: u64,
}

/// A transponder reply received on an interrogation sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IffReturn {
    pub target: AssetId,
    pub target_position: GeoPoint,
    pub ownship_position: GeoPoint,
    pub bearing: f64,
    pub range: f64,
    pub created_tick: u64,
    pub mode1: Option<String>,
    pub mode2: Option<String>,
    pub mode3: Option<String>,
}

/// Passive intercept of one emitter on one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsmContact {
    /// Assigned once per (asset, emitter) pair, never reused.
    pub serial: u32,
    pub asset: AssetId,
    pub emitter: String,
    /// Bearing from ownship, degrees true.
    pub bearing: f64,
    pub position: GeoPoint,
    pub active: bool,
    pub last_seen_tick: u64,
    /// Operator-controlled line-of-bearing display.
    pub visible: bool,
}

/// A subsurface asset inside a buoy's listening radius this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcousticDetection {
    pub buoy: u32,
    pub asset: AssetId,
}

/// Operator-drawn line of bearing from the ownship position at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualBearingLine {
    pub serial: u32,
    pub origin: GeoPoint,
    pub bearing: f64,
    pub created_tick: u64,
}

/// Shared reference point for relative call-outs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullseye {
    pub position: GeoPoint,
    pub name: Option<String>,
}

/// Operator reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMarker {
    pub id: u32,
    pub name: String,
    pub position: GeoPoint,
}

/// Geometry of a drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Circle { center: GeoPoint, radius_nm: f64 },
    Polyline { vertices: Vec<GeoPoint> },
    Polygon { vertices: Vec<GeoPoint> },
}

/// A named shape drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    pub name: String,
    pub geometry: ShapeGeometry,
}

impl Default for Bullseye {
    fn default() -> Self {
        Self {
            position: GeoPoint::new(26.5, 54.0),
            name: None,
        }
    }
}

impl ShapeGeometry {
    /// Point used to place and drag the shape.
    pub fn anchor(&self) -> Option<GeoPoint> {
        match self {
            ShapeGeometry::Circle { center, .. } => Some(*center),
            ShapeGeometry::Polyline { vertices } | ShapeGeometry::Polygon { vertices } => {
                vertices.first().copied()
            }
        }
    }

    /// Translate the whole shape so its anchor lands on `to`.
    pub fn move_anchor_to(&mut self, to: GeoPoint) {
        let Some(anchor) = self.anchor() else {
            return;
        };
        let dlat = to.lat - anchor.lat;
        let dlon = to.lon - anchor.lon;
        match self {
            ShapeGeometry::Circle { center, .. } => *center = to,
            ShapeGeometry::Polyline { vertices } | ShapeGeometry::Polygon { vertices } => {
                for v in vertices.iter_mut() {
                    v.lat += dlat;
                    v.lon += dlon;
                }
            }
        }
    }

    /// Whether the geometry can be drawn.
    pub fn is_valid(&self) -> bool {
        match self {
            ShapeGeometry::Circle { center, radius_nm } => {
                center.is_valid() && radius_nm.is_finite() && *radius_nm > 0.0
            }
            ShapeGeometry::Polyline { vertices } => {
                vertices.len() >= 2 && vertices.iter().all(GeoPoint::is_valid)
            }
            ShapeGeometry::Polygon { vertices } => {
                vertices.len() >= 3 && vertices.iter().all(GeoPoint::is_valid)
            }
        }
    }
}
