//! Snapshot system: queries the ECS world and builds a complete WorldSnapshot.
//!
//! This system is read-only and never modifies the world.

use std::collections::BTreeMap;

use hecs::World;

use tactrainer_core::components::*;
use tactrainer_core::enums::*;
use tactrainer_core::events::{Alert, SimEvent};
use tactrainer_core::state::*;
use tactrainer_core::types::SimTime;

use crate::annotations::Annotations;
use crate::systems::sensors::SensorState;

/// Engine-owned state the snapshot is assembled from.
pub struct SnapshotSource<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub phase: SimPhase,
    pub time_scale: f64,
    pub mission_clock_secs: u64,
    pub sensors: &'a SensorState,
    pub annotations: &'a Annotations,
    pub systems: SystemStates,
    pub datalink: &'a DatalinkConfig,
}

/// Build a complete WorldSnapshot from the current world state.
pub fn build_snapshot(source: &SnapshotSource<'_>, alerts: Vec<Alert>, events: Vec<SimEvent>) -> WorldSnapshot {
    let sensors = source.sensors;
    let annotations = source.annotations;

    WorldSnapshot {
        time: source.time,
        phase: source.phase,
        time_scale: source.time_scale,
        mission_clock_secs: source.mission_clock_secs,
        assets: build_assets(source.world, annotations),
        weapons: build_weapons(source.world),
        inventory: build_inventory(source.world),
        radar: RadarView {
            sweep_angle: sensors.sweep_angle,
            return_decay_secs: sensors.return_decay_secs,
        },
        radar_returns: sensors.radar_returns.clone(),
        iff_returns: sensors.iff_returns.clone(),
        esm_contacts: sensors.esm_contacts.clone(),
        sonobuoys: sensors.sonobuoys.clone(),
        acoustic_detections: sensors.acoustic_detections.clone(),
        bearing_lines: annotations.bearing_lines.clone(),
        bullseye: annotations.bullseye.clone(),
        geo_points: annotations.geo_points.clone(),
        shapes: annotations.shapes.clone(),
        systems: source.systems,
        datalink: source.datalink.clone(),
        alerts,
        events,
    }
}

/// Build AssetView list from all asset entities, sorted by id.
fn build_assets(world: &World, annotations: &Annotations) -> Vec<AssetView> {
    let mut assets: Vec<AssetView> = world
        .query::<(
            &AssetId,
            &AssetInfo,
            &Kinematics,
            &Commanded,
            &WaypointQueue,
            &Transponder,
            &DatalinkState,
            &Emitters,
        )>()
        .iter()
        .map(
            |(_, (id, info, kin, commanded, route, transponder, datalink, emitters))| AssetView {
                id: *id,
                name: info.name.clone(),
                category: info.category,
                frame: info.category.frame(),
                domain: info.domain,
                platform: info.platform.clone(),
                kinematics: *kin,
                commanded: *commanded,
                waypoints: route.points.clone(),
                track_number: info.track_number,
                track_label: info.track_number.map(format_track_number),
                transponder: transponder.clone(),
                datalink: datalink.clone(),
                emitters: emitters.states.clone(),
                bullseye: annotations.readout(&kin.position),
            },
        )
        .collect();

    assets.sort_by_key(|a| a.id);
    assets
}

/// Build WeaponView list from in-flight munitions, sorted by id.
fn build_weapons(world: &World) -> Vec<WeaponView> {
    let mut weapons: Vec<WeaponView> = world
        .query::<(&Munition, &Kinematics)>()
        .iter()
        .map(|(_, (munition, kin))| WeaponView {
            munition: munition.clone(),
            kinematics: *kin,
        })
        .collect();

    weapons.sort_by_key(|w| w.munition.id);
    weapons
}

/// Ownship magazine contents.
fn build_inventory(world: &World) -> BTreeMap<WeaponCategory, u32> {
    world
        .query::<(&OwnShip, &WeaponInventory)>()
        .iter()
        .next()
        .map(|(_, (_, inventory))| inventory.counts.clone())
        .unwrap_or_default()
}
