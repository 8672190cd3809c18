//! Ownship sensor channels: radar, IFF, ESM and acoustic buoys.
//!
//! Each channel is an independent pass over the world. Detection records live
//! in [`SensorState`], not in the ECS, and are copied into every snapshot.

pub mod acoustic;
pub mod esm;
pub mod iff;
pub mod radar;

use hecs::World;
use serde::{Deserialize, Serialize};

use tactrainer_core::catalog::PlatformCatalog;
use tactrainer_core::components::*;
use tactrainer_core::constants::DEFAULT_RETURN_DECAY_SECS;
use tactrainer_core::detections::*;
use tactrainer_core::enums::Domain;
use tactrainer_core::events::SimEvent;
use tactrainer_core::state::SystemStates;
use tactrainer_core::types::SimTime;

/// Everything the sensor channels remember between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorState {
    /// Radar antenna bearing, degrees true.
    pub sweep_angle: f64,
    pub return_decay_secs: f64,
    pub radar_returns: Vec<RadarReturn>,
    pub iff_returns: Vec<IffReturn>,
    pub esm_contacts: Vec<EsmContact>,
    pub next_esm_serial: u32,
    pub sonobuoys: Vec<Sonobuoy>,
    pub next_buoy_id: u32,
    pub acoustic_detections: Vec<AcousticDetection>,
}

impl Default for SensorState {
    fn default() -> Self {
        Self {
            sweep_angle: 0.0,
            return_decay_secs: DEFAULT_RETURN_DECAY_SECS,
            radar_returns: Vec::new(),
            iff_returns: Vec::new(),
            esm_contacts: Vec::new(),
            next_esm_serial: 1,
            sonobuoys: Vec::new(),
            next_buoy_id: 1,
            acoustic_detections: Vec::new(),
        }
    }
}

/// A non-ownship asset as the sensors see it.
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: AssetId,
    pub domain: Domain,
    pub platform: Option<String>,
    pub kinematics: Kinematics,
    pub transponder: Transponder,
    pub emitters: Emitters,
}

/// Ownship state the sensors measure from.
#[derive(Debug, Clone, Copy)]
pub struct SensorOrigin {
    pub kinematics: Kinematics,
    pub domain: Domain,
}

/// Collect every non-ownship asset, sorted by id.
pub fn contacts(world: &World) -> Vec<Contact> {
    let mut list: Vec<Contact> = world
        .query::<(
            &AssetId,
            &AssetInfo,
            &Kinematics,
            &Transponder,
            &Emitters,
            Option<&OwnShip>,
        )>()
        .iter()
        .filter(|(_, (_, _, _, _, _, own))| own.is_none())
        .map(|(_, (id, info, kin, transponder, emitters, _))| Contact {
            id: *id,
            domain: info.domain,
            platform: info.platform.clone(),
            kinematics: *kin,
            transponder: transponder.clone(),
            emitters: emitters.clone(),
        })
        .collect();
    list.sort_by_key(|c| c.id);
    list
}

/// Run all sensor channels for one tick, then purge stale returns.
pub fn run(
    world: &World,
    platforms: &PlatformCatalog,
    state: &mut SensorState,
    systems: &SystemStates,
    time: &SimTime,
    events: &mut Vec<SimEvent>,
) {
    let origin = crate::world_setup::ownship_state(world).map(|(_, kinematics, domain)| SensorOrigin {
        kinematics,
        domain,
    });
    let contacts = contacts(world);

    if systems.radar {
        radar::advance_sweep(state);
    }

    if let Some(origin) = origin {
        if systems.radar {
            radar::run(&origin, &contacts, state, time.tick);
            if systems.iff {
                iff::run(&origin, &contacts, state, time.tick);
            }
        }
        esm::run(&origin, &contacts, platforms, state, systems.esm, time.tick, events);
    }

    acoustic::run(world, state);
    purge_returns(state, time);
}

/// Drop radar and IFF returns whose age has reached the decay time.
pub fn purge_returns(state: &mut SensorState, time: &SimTime) {
    let decay = state.return_decay_secs;
    state
        .radar_returns
        .retain(|r| time.age_secs(r.created_tick) < decay);
    state
        .iff_returns
        .retain(|r| time.age_secs(r.created_tick) < decay);
}
