//! Passive sonobuoys. Detections are rebuilt from scratch every tick.

use hecs::World;

use tactrainer_core::components::{AssetId, AssetInfo, Kinematics, Sonobuoy};
use tactrainer_core::constants::SONOBUOY_DETECTION_RANGE_NM;
use tactrainer_core::detections::AcousticDetection;
use tactrainer_core::enums::Domain;
use tactrainer_core::types::GeoPoint;

use super::SensorState;

/// Recompute which subsurface assets each buoy can hear.
pub fn run(world: &World, state: &mut SensorState) {
    let mut submerged: Vec<(AssetId, Kinematics)> = world
        .query::<(&AssetId, &AssetInfo, &Kinematics)>()
        .iter()
        .filter(|(_, (_, info, _))| info.domain == Domain::Subsurface)
        .map(|(_, (id, _, kin))| (*id, *kin))
        .collect();
    submerged.sort_by_key(|(id, _)| *id);

    state.acoustic_detections.clear();
    for buoy in &state.sonobuoys {
        for (id, kin) in &submerged {
            if buoy.position.distance_to(&kin.position) <= SONOBUOY_DETECTION_RANGE_NM {
                state.acoustic_detections.push(AcousticDetection {
                    buoy: buoy.id,
                    asset: *id,
                });
            }
        }
    }
}

/// Drop a new buoy, returning its id.
pub fn deploy(state: &mut SensorState, position: GeoPoint, deploy_time: f64) -> u32 {
    let id = state.next_buoy_id;
    state.next_buoy_id += 1;
    state.sonobuoys.push(Sonobuoy {
        id,
        position,
        deploy_time,
    });
    tracing::info!(buoy = id, lat = position.lat, lon = position.lon, "Sonobuoy deployed");
    id
}
