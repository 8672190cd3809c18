//! Scenario documents: versioned JSON save files.
//!
//! A document captures everything needed to rebuild a world: assets,
//! munitions, the ownship magazine, map annotations, sensor settings and
//! every id counter. Optional sections fall back to defaults so older or
//! hand-written files load.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use tactrainer_core::components::*;
use tactrainer_core::constants::{
    DEFAULT_RETURN_DECAY_SECS, OWNSHIP_MAX_ALTITUDE_FT, OWNSHIP_MAX_SPEED_KN, SCENARIO_VERSION,
};
use tactrainer_core::enums::*;
use tactrainer_core::error::ScenarioError;
use tactrainer_core::state::{DatalinkConfig, SystemStates, WeaponView};
use tactrainer_core::types::GeoPoint;

use crate::annotations::Annotations;
use crate::world_setup;

/// One asset as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: AssetId,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub platform: Option<String>,
    pub position: GeoPoint,
    #[serde(default)]
    pub heading: f64,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub commanded: Commanded,
    #[serde(default)]
    pub waypoints: Vec<GeoPoint>,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(default)]
    pub transponder: Transponder,
    #[serde(default)]
    pub datalink: DatalinkState,
    #[serde(default)]
    pub emitters: BTreeMap<String, bool>,
}

/// Full save data written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDocument {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
    #[serde(default)]
    pub next_asset_id: u32,
    /// Launch times are seconds relative to the moment of saving (zero or less).
    #[serde(default)]
    pub weapons: Vec<WeaponView>,
    #[serde(default)]
    pub next_weapon_id: u32,
    #[serde(default)]
    pub inventory: BTreeMap<WeaponCategory, u32>,
    /// Deploy times are relative to the moment of saving, like weapon launches.
    #[serde(default)]
    pub sonobuoys: Vec<Sonobuoy>,
    #[serde(default = "first_id")]
    pub next_buoy_id: u32,
    #[serde(default)]
    pub mission_clock_secs: u64,
    #[serde(default)]
    pub datalink: DatalinkConfig,
    #[serde(default)]
    pub systems: SystemStates,
    #[serde(default = "default_decay")]
    pub return_decay_secs: f64,
    #[serde(flatten)]
    pub annotations: Annotations,
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default = "current_version")]
    version: u32,
}

fn current_version() -> u32 {
    SCENARIO_VERSION
}

fn first_id() -> u32 {
    1
}

fn default_decay() -> f64 {
    DEFAULT_RETURN_DECAY_SECS
}

impl Default for ScenarioDocument {
    fn default() -> Self {
        Self {
            version: SCENARIO_VERSION,
            name: None,
            assets: Vec::new(),
            next_asset_id: 0,
            weapons: Vec::new(),
            next_weapon_id: 0,
            inventory: BTreeMap::new(),
            sonobuoys: Vec::new(),
            next_buoy_id: 1,
            mission_clock_secs: 0,
            datalink: DatalinkConfig::default(),
            systems: SystemStates::default(),
            return_decay_secs: DEFAULT_RETURN_DECAY_SECS,
            annotations: Annotations::default(),
        }
    }
}

impl ScenarioDocument {
    /// Parse, version-check and normalize a document.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let probe: VersionProbe = serde_json::from_str(json)?;
        if probe.version > SCENARIO_VERSION {
            return Err(ScenarioError::UnsupportedVersion {
                found: probe.version,
                supported: SCENARIO_VERSION,
            });
        }
        let mut doc: ScenarioDocument = serde_json::from_str(json)?;
        doc.normalize()?;
        Ok(doc)
    }

    pub fn to_json_string(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ScenarioError> {
        let json = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ScenarioError> {
        let io_error = |source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_error)?;
        }
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(io_error)?;
        Ok(())
    }

    /// Enforce the invariants a world relies on.
    ///
    /// Exactly one ownship afterwards: extras are demoted to `unknown`; with
    /// none, an asset named "ownship" is promoted, else a default is added.
    /// Duplicate asset ids are renumbered and every counter is moved past the
    /// ids in use.
    pub fn normalize(&mut self) -> Result<(), ScenarioError> {
        self.version = SCENARIO_VERSION;

        for asset in &self.assets {
            if !asset.position.is_valid() {
                return Err(ScenarioError::Invalid(format!(
                    "asset '{}' has position {}, {}",
                    asset.name, asset.position.lat, asset.position.lon
                )));
            }
            if let Some(bad) = asset.waypoints.iter().find(|p| !p.is_valid()) {
                return Err(ScenarioError::Invalid(format!(
                    "asset '{}' has waypoint {}, {}",
                    asset.name, bad.lat, bad.lon
                )));
            }
        }
        if !self.return_decay_secs.is_finite() || self.return_decay_secs <= 0.0 {
            return Err(ScenarioError::Invalid(format!(
                "return decay {} s",
                self.return_decay_secs
            )));
        }

        let mut next_id = self
            .assets
            .iter()
            .map(|a| a.id.0 + 1)
            .max()
            .unwrap_or(0)
            .max(self.next_asset_id);
        let mut seen = std::collections::HashSet::new();
        for asset in &mut self.assets {
            if !seen.insert(asset.id) {
                tracing::warn!(name = %asset.name, id = %asset.id, "Duplicate asset id renumbered");
                asset.id = AssetId(next_id);
                next_id += 1;
            }
        }

        let ownships: Vec<usize> = self
            .assets
            .iter()
            .enumerate()
            .filter(|(_, a)| a.category == Category::Ownship)
            .map(|(i, _)| i)
            .collect();
        match ownships.as_slice() {
            [] => {
                if let Some(named) = self
                    .assets
                    .iter_mut()
                    .find(|a| a.name.eq_ignore_ascii_case("ownship"))
                {
                    tracing::warn!(id = %named.id, "No ownship in scenario; promoting asset named ownship");
                    named.category = Category::Ownship;
                } else {
                    tracing::warn!("No ownship in scenario; creating default ownship");
                    self.assets
                        .insert(0, world_setup::default_ownship_record(AssetId(next_id)));
                    next_id += 1;
                }
            }
            [_] => {}
            [_, extras @ ..] => {
                for &i in extras {
                    tracing::warn!(name = %self.assets[i].name, "Extra ownship demoted to unknown");
                    self.assets[i].category = Category::Unknown;
                }
            }
        }
        self.next_asset_id = next_id;

        if let Some(own) = self.assets.iter_mut().find(|a| a.category == Category::Ownship) {
            clamp_ownship_performance(own);
        }

        // Stamps are relative to load time; later ones are pulled back to it.
        for weapon in &mut self.weapons {
            weapon.munition.launch_time = weapon.munition.launch_time.min(0.0);
        }
        for buoy in &mut self.sonobuoys {
            buoy.deploy_time = buoy.deploy_time.min(0.0);
        }

        self.next_weapon_id = self
            .weapons
            .iter()
            .map(|w| w.munition.id.0 + 1)
            .max()
            .unwrap_or(0)
            .max(self.next_weapon_id);
        self.next_buoy_id = self
            .sonobuoys
            .iter()
            .map(|b| b.id + 1)
            .max()
            .unwrap_or(1)
            .max(self.next_buoy_id);

        let a = &mut self.annotations;
        a.next_geo_point_id = a
            .geo_points
            .iter()
            .map(|p| p.id + 1)
            .max()
            .unwrap_or(1)
            .max(a.next_geo_point_id);
        a.next_shape_id = a
            .shapes
            .iter()
            .map(|s| s.id + 1)
            .max()
            .unwrap_or(1)
            .max(a.next_shape_id);
        a.next_bearing_serial = a
            .bearing_lines
            .iter()
            .map(|l| l.serial + 1)
            .max()
            .unwrap_or(1)
            .max(a.next_bearing_serial);

        if let (Some(start), Some(end)) = (
            self.datalink.track_block_start,
            self.datalink.track_block_end,
        ) {
            if start > end {
                return Err(ScenarioError::Invalid(format!(
                    "track block {start}..{end}"
                )));
            }
            self.datalink.next_track_number = self.datalink.next_track_number.max(start);
        }

        Ok(())
    }

    /// The ownship record. Present after `normalize`.
    pub fn ownship(&self) -> Option<&AssetRecord> {
        self.assets.iter().find(|a| a.category == Category::Ownship)
    }
}

/// Hold the ownship to its speed and altitude ceiling, current and commanded.
fn clamp_ownship_performance(own: &mut AssetRecord) {
    if own.speed > OWNSHIP_MAX_SPEED_KN || own.altitude > OWNSHIP_MAX_ALTITUDE_FT {
        tracing::warn!(name = %own.name, speed = own.speed, altitude = own.altitude, "Ownship performance clamped on load");
    }
    own.speed = own.speed.clamp(0.0, OWNSHIP_MAX_SPEED_KN);
    own.altitude = own.altitude.clamp(0.0, OWNSHIP_MAX_ALTITUDE_FT);
    if let Some(speed) = own.commanded.speed.as_mut() {
        *speed = speed.clamp(0.0, OWNSHIP_MAX_SPEED_KN);
    }
    if let Some(altitude) = own.commanded.altitude.as_mut() {
        *altitude = altitude.clamp(0.0, OWNSHIP_MAX_ALTITUDE_FT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u32, name: &str, category: Category) -> AssetRecord {
        let mut r = world_setup::default_ownship_record(AssetId(id));
        r.name = name.to_string();
        r.category = category;
        r
    }

    #[test]
    fn test_minimal_document_takes_defaults() {
        let doc = ScenarioDocument::from_json_str(r#"{"version": 1}"#).unwrap();
        assert_eq!(doc.assets.len(), 1);
        assert_eq!(doc.ownship().unwrap().name, world_setup::DEFAULT_OWNSHIP_NAME);
        assert_eq!(doc.return_decay_secs, DEFAULT_RETURN_DECAY_SECS);
        assert_eq!(doc.annotations.bullseye.position, GeoPoint::new(26.5, 54.0));
        assert_eq!(doc.next_asset_id, 1);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = ScenarioDocument::from_json_str(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::UnsupportedVersion {
                found: 99,
                supported: 1
            }
        ));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(matches!(
            ScenarioDocument::from_json_str("{\"assets\": ["),
            Err(ScenarioError::Malformed(_))
        ));
    }

    #[test]
    fn test_extra_ownships_demoted() {
        let mut doc = ScenarioDocument {
            assets: vec![
                record(0, "First", Category::Ownship),
                record(1, "Second", Category::Ownship),
            ],
            ..Default::default()
        };
        doc.normalize().unwrap();
        assert_eq!(doc.assets[0].category, Category::Ownship);
        assert_eq!(doc.assets[1].category, Category::Unknown);
    }

    #[test]
    fn test_named_ownship_promoted() {
        let mut doc = ScenarioDocument {
            assets: vec![
                record(3, "Bogey", Category::Hostile),
                record(4, "OWNSHIP", Category::Friendly),
            ],
            ..Default::default()
        };
        doc.normalize().unwrap();
        assert_eq!(doc.assets.len(), 2);
        assert_eq!(doc.ownship().unwrap().id, AssetId(4));
        assert_eq!(doc.next_asset_id, 5);
    }

    #[test]
    fn test_ownship_performance_clamped_on_load() {
        let mut own = record(0, "Own", Category::Ownship);
        own.speed = 400.0;
        own.altitude = 40_000.0;
        own.commanded.speed = Some(300.0);
        own.commanded.altitude = Some(35_000.0);
        let mut hostile = record(1, "Fast mover", Category::Hostile);
        hostile.speed = 400.0;
        let mut doc = ScenarioDocument {
            assets: vec![own, hostile],
            ..Default::default()
        };
        doc.normalize().unwrap();

        let own = doc.ownship().unwrap();
        assert_eq!(own.speed, OWNSHIP_MAX_SPEED_KN);
        assert_eq!(own.altitude, OWNSHIP_MAX_ALTITUDE_FT);
        assert_eq!(own.commanded.speed, Some(OWNSHIP_MAX_SPEED_KN));
        assert_eq!(own.commanded.altitude, Some(OWNSHIP_MAX_ALTITUDE_FT));
        // Only the ownship is capped.
        assert_eq!(doc.assets[1].speed, 400.0);
    }

    #[test]
    fn test_duplicate_ids_renumbered() {
        let mut doc = ScenarioDocument {
            assets: vec![
                record(0, "Own", Category::Ownship),
                record(2, "A", Category::Hostile),
                record(2, "B", Category::Hostile),
            ],
            ..Default::default()
        };
        doc.normalize().unwrap();
        assert_eq!(doc.assets[2].id, AssetId(3));
        assert_eq!(doc.next_asset_id, 4);
    }

    #[test]
    fn test_invalid_position_rejected() {
        let mut doc = ScenarioDocument {
            assets: vec![record(0, "Own", Category::Ownship)],
            ..Default::default()
        };
        doc.assets[0].position = GeoPoint::new(120.0, 0.0);
        assert!(matches!(doc.normalize(), Err(ScenarioError::Invalid(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join("tactrainer_test_scenario_file");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("demo.json");

        let mut doc = ScenarioDocument {
            name: Some("Demo".into()),
            assets: vec![record(0, "Own", Category::Ownship)],
            ..Default::default()
        };
        doc.inventory.insert(WeaponCategory::Torpedo, 3);
        doc.normalize().unwrap();
        doc.save_to_file(&path).unwrap();

        let loaded = ScenarioDocument::load_from_file(&path).unwrap();
        assert_eq!(loaded, doc);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("tactrainer_no_such_scenario.json");
        let _ = fs::remove_file(&path);
        assert!(matches!(
            ScenarioDocument::load_from_file(&path),
            Err(ScenarioError::Io { .. })
        ));
    }
}
