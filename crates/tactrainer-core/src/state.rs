//! World snapshot: the complete read-only state handed to the rendering layer after each tick.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::detections::*;
use crate::enums::*;
use crate::events::{Alert, SimEvent};
use crate::types::{GeoPoint, RelativePosition, SimTime};

/// Complete world state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub time_scale: f64,
    /// Whole seconds on the 1 Hz mission clock.
    pub mission_clock_secs: u64,
    pub assets: Vec<AssetView>,
    pub weapons: Vec<WeaponView>,
    pub inventory: BTreeMap<WeaponCategory, u32>,
    pub radar: RadarView,
    pub radar_returns: Vec<RadarReturn>,
    pub iff_returns: Vec<IffReturn>,
    pub esm_contacts: Vec<EsmContact>,
    pub sonobuoys: Vec<Sonobuoy>,
    pub acoustic_detections: Vec<AcousticDetection>,
    pub bearing_lines: Vec<ManualBearingLine>,
    pub bullseye: Bullseye,
    pub geo_points: Vec<GeoMarker>,
    pub shapes: Vec<Shape>,
    pub systems: SystemStates,
    pub datalink: DatalinkConfig,
    pub alerts: Vec<Alert>,
    pub events: Vec<SimEvent>,
}

/// Render a track number the way unit codes are written ("00042").
pub fn format_track_number(number: u32) -> String {
    format!("{number:0width$}", width = crate::constants::UNIT_CODE_DIGITS)
}

/// One asset as drawn on the tactical display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetView {
    pub id: AssetId,
    pub name: String,
    pub category: Category,
    pub frame: SymbolFrame,
    pub domain: Domain,
    pub platform: Option<String>,
    pub kinematics: Kinematics,
    pub commanded: Commanded,
    pub waypoints: VecDeque<GeoPoint>,
    pub track_number: Option<u32>,
    /// `track_number` as displayed, zero-padded to a unit code's width.
    pub track_label: Option<String>,
    pub transponder: Transponder,
    pub datalink: DatalinkState,
    pub emitters: BTreeMap<String, bool>,
    /// From the bullseye.
    pub bullseye: RelativePosition,
}

/// One munition in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub munition: Munition,
    pub kinematics: Kinematics,
}

/// Rotating radar state for the PPI sweep line.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RadarView {
    /// Degrees true.
    pub sweep_angle: f64,
    pub return_decay_secs: f64,
}

/// Ownship system power states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStates {
    pub radar: bool,
    pub iff: bool,
    pub esm: bool,
    pub datalink: bool,
}

/// Ownship datalink configuration and track-number counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatalinkConfig {
    pub network_id: Option<String>,
    pub track_block_start: Option<u32>,
    pub track_block_end: Option<u32>,
    /// Next number ReportTrack will issue.
    pub next_track_number: u32,
}

impl Default for SystemStates {
    fn default() -> Self {
        Self {
            radar: true,
            iff: true,
            esm: true,
            datalink: false,
        }
    }
}

impl SystemStates {
    /// Flip one system, returning its new state.
    pub fn toggle(&mut self, system: SystemKind) -> bool {
        let slot = match system {
            SystemKind::Radar => &mut self.radar,
            SystemKind::Iff => &mut self.iff,
            SystemKind::Esm => &mut self.esm,
            SystemKind::Datalink => &mut self.datalink,
        };
        *slot = !*slot;
        *slot
    }
}

impl DatalinkConfig {
    /// Network id and both block bounds are present.
    pub fn is_configured(&self) -> bool {
        self.network_id.as_deref().is_some_and(|n| !n.is_empty())
            && self.track_block_start.is_some()
            && self.track_block_end.is_some()
    }

    /// Whether `number` lies in the configured block.
    pub fn block_contains(&self, number: u32) -> bool {
        match (self.track_block_start, self.track_block_end) {
            (Some(start), Some(end)) => (start..=end).contains(&number),
            _ => false,
        }
    }
}
