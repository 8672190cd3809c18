//! Munition flight system: pursuit guidance and position integration.
//!
//! Target positions are sampled after asset kinematics has run, so guidance
//! always chases where the target is this tick.

use std::collections::HashMap;

use hecs::World;

use tactrainer_core::catalog::WeaponCatalog;
use tactrainer_core::components::{AssetId, Kinematics, Munition};
use tactrainer_core::types::GeoPoint;

use crate::guidance;

/// Current position of every asset, for munitions to steer by.
pub fn asset_positions(world: &World) -> HashMap<AssetId, GeoPoint> {
    world
        .query::<(&AssetId, &Kinematics)>()
        .iter()
        .map(|(_, (id, kin))| (*id, kin.position))
        .collect()
}

/// Advance every munition one tick.
pub fn run(world: &mut World, weapons: &WeaponCatalog, dt: f64) {
    let targets = asset_positions(world);

    for (_entity, (munition, kin)) in world.query_mut::<(&Munition, &mut Kinematics)>() {
        let target = targets.get(&munition.target).copied();
        guidance::step(kin, target, weapons.get(&munition.variant), dt);
    }
}
