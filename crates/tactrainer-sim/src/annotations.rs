//! Operator map annotations: bullseye, reference points, shapes and manual
//! bearing lines.
//!
//! Ids are allocated from per-kind counters and never reused within a
//! scenario.

use serde::{Deserialize, Serialize};

use tactrainer_core::detections::*;
use tactrainer_core::error::CommandError;
use tactrainer_core::geo::normalize_heading;
use tactrainer_core::types::{GeoPoint, RelativePosition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bullseye: Bullseye,
    pub geo_points: Vec<GeoMarker>,
    pub next_geo_point_id: u32,
    pub shapes: Vec<Shape>,
    pub next_shape_id: u32,
    pub bearing_lines: Vec<ManualBearingLine>,
    pub next_bearing_serial: u32,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bullseye: Bullseye::default(),
            geo_points: Vec::new(),
            next_geo_point_id: 1,
            shapes: Vec::new(),
            next_shape_id: 1,
            bearing_lines: Vec::new(),
            next_bearing_serial: 1,
        }
    }
}

impl Annotations {
    pub fn set_bullseye(&mut self, position: GeoPoint, name: Option<String>) {
        self.bullseye = Bullseye { position, name };
    }

    /// Bearing and range of `point` from the bullseye.
    pub fn readout(&self, point: &GeoPoint) -> RelativePosition {
        self.bullseye.position.relative(point)
    }

    pub fn create_geo_point(&mut self, name: String, position: GeoPoint) -> u32 {
        let id = self.next_geo_point_id;
        self.next_geo_point_id += 1;
        self.geo_points.push(GeoMarker { id, name, position });
        id
    }

    pub fn delete_geo_point(&mut self, id: u32) -> Result<(), CommandError> {
        let before = self.geo_points.len();
        self.geo_points.retain(|p| p.id != id);
        if self.geo_points.len() == before {
            return Err(CommandError::NotFound(format!("geo point {id}")));
        }
        Ok(())
    }

    pub fn move_geo_point(&mut self, id: u32, position: GeoPoint) -> Result<(), CommandError> {
        let point = self
            .geo_points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CommandError::NotFound(format!("geo point {id}")))?;
        point.position = position;
        Ok(())
    }

    pub fn create_shape(&mut self, name: String, geometry: ShapeGeometry) -> Result<u32, CommandError> {
        if !geometry.is_valid() {
            return Err(CommandError::InvalidValue(format!(
                "shape '{name}' has degenerate geometry"
            )));
        }
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        self.shapes.push(Shape { id, name, geometry });
        Ok(id)
    }

    pub fn delete_shape(&mut self, id: u32) -> Result<(), CommandError> {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        if self.shapes.len() == before {
            return Err(CommandError::NotFound(format!("shape {id}")));
        }
        Ok(())
    }

    /// Drag a shape so its anchor lands on `position`.
    pub fn move_shape(&mut self, id: u32, position: GeoPoint) -> Result<(), CommandError> {
        let shape = self
            .shapes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CommandError::NotFound(format!("shape {id}")))?;
        let mut moved = shape.geometry.clone();
        moved.move_anchor_to(position);
        if !moved.is_valid() {
            return Err(CommandError::InvalidCoordinate(format!(
                "shape {id} would leave the map"
            )));
        }
        shape.geometry = moved;
        Ok(())
    }

    pub fn create_bearing_line(&mut self, origin: GeoPoint, bearing: f64, tick: u64) -> Result<u32, CommandError> {
        if !bearing.is_finite() {
            return Err(CommandError::InvalidValue(format!("bearing {bearing}")));
        }
        let serial = self.next_bearing_serial;
        self.next_bearing_serial += 1;
        self.bearing_lines.push(ManualBearingLine {
            serial,
            origin,
            bearing: normalize_heading(bearing),
            created_tick: tick,
        });
        Ok(serial)
    }

    pub fn delete_bearing_line(&mut self, serial: u32) -> Result<(), CommandError> {
        let before = self.bearing_lines.len();
        self.bearing_lines.retain(|l| l.serial != serial);
        if self.bearing_lines.len() == before {
            return Err(CommandError::NotFound(format!("bearing line {serial}")));
        }
        Ok(())
    }

    /// Re-anchor a bearing line; its bearing is unchanged.
    pub fn move_bearing_line(&mut self, serial: u32, origin: GeoPoint) -> Result<(), CommandError> {
        let line = self
            .bearing_lines
            .iter_mut()
            .find(|l| l.serial == serial)
            .ok_or_else(|| CommandError::NotFound(format!("bearing line {serial}")))?;
        line.origin = origin;
        Ok(())
    }
}
