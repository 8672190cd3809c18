//! Impact resolution: a munition inside the impact radius of its target hits.
//!
//! Engagement is binary. The munition and its target are removed together,
//! except that the ownship is never removed; hitting it only raises an alert.

use hecs::{Entity, World};

use tactrainer_core::components::{Kinematics, Munition};
use tactrainer_core::constants::WEAPON_IMPACT_RANGE_NM;
use tactrainer_core::enums::AlertLevel;
use tactrainer_core::events::{Alert, SimEvent};

use crate::systems::missile_kinematics::asset_positions;
use crate::world_setup::AssetIndex;

/// Resolve impacts for this tick.
pub fn run(
    world: &mut World,
    index: &mut AssetIndex,
    events: &mut Vec<SimEvent>,
    alerts: &mut Vec<Alert>,
    despawn_buffer: &mut Vec<Entity>,
    current_tick: u64,
) {
    let targets = asset_positions(world);
    let ownship = crate::world_setup::find_ownship(world).map(|(_, id)| id);

    let mut hits: Vec<(Entity, Munition)> = Vec::new();
    for (entity, (munition, kin)) in world.query::<(&Munition, &Kinematics)>().iter() {
        let Some(target) = targets.get(&munition.target) else {
            continue;
        };
        if kin.position.distance_to(target) < WEAPON_IMPACT_RANGE_NM {
            hits.push((entity, munition.clone()));
        }
    }

    for (entity, munition) in hits {
        despawn_buffer.push(entity);
        events.push(SimEvent::Impact {
            weapon: munition.id,
            target: munition.target,
        });

        if Some(munition.target) == ownship {
            tracing::warn!(weapon = munition.id.0, firer = %munition.firer, "Ownship hit");
            alerts.push(Alert {
                level: AlertLevel::Critical,
                message: format!("Ownship hit by {} from {}", munition.variant, munition.firer),
                tick: current_tick,
            });
            continue;
        }

        if let Some(target_entity) = index.remove(munition.target) {
            despawn_buffer.push(target_entity);
            tracing::info!(weapon = munition.id.0, target_id = %munition.target, "Target destroyed");
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
