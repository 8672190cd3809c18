//! Fire control: validates a launch request and puts a munition in the air.
//!
//! A rejected launch has no side effects. Only the ownship draws from a
//! magazine; every other firer has unlimited rounds.

use hecs::World;

use tactrainer_core::catalog::{PlatformCatalog, WeaponCatalog};
use tactrainer_core::components::*;
use tactrainer_core::constants::WEAPON_LAUNCH_SPEED_KN;
use tactrainer_core::enums::WeaponCategory;
use tactrainer_core::error::CommandError;

use crate::guidance;
use crate::world_setup::AssetIndex;

/// One launch request.
#[derive(Debug, Clone, Copy)]
pub struct FireOrder {
    pub firer: AssetId,
    pub target: AssetId,
    pub category: WeaponCategory,
}

/// Launch a munition for `order`, returning it on success.
pub fn fire(
    world: &mut World,
    index: &AssetIndex,
    platforms: &PlatformCatalog,
    weapons: &WeaponCatalog,
    order: FireOrder,
    next_weapon_id: &mut u32,
    launch_time: f64,
) -> Result<Munition, CommandError> {
    let firer_entity = index.entity(order.firer)?;
    let target_entity = index.entity(order.target)?;
    if order.firer == order.target {
        return Err(CommandError::InvalidValue(format!(
            "asset {} cannot fire on itself",
            order.firer
        )));
    }

    let (firer_info, firer_kin) = {
        let info = world
            .get::<&AssetInfo>(firer_entity)
            .map_err(|_| CommandError::AssetNotFound(order.firer))?;
        let kin = world
            .get::<&Kinematics>(firer_entity)
            .map_err(|_| CommandError::AssetNotFound(order.firer))?;
        ((*info).clone(), *kin)
    };
    let target_position = world
        .get::<&Kinematics>(target_entity)
        .map_err(|_| CommandError::AssetNotFound(order.target))?
        .position;

    let no_variant = CommandError::NoWeaponVariant {
        firer: order.firer,
        category: order.category,
    };
    let profile = firer_info
        .platform
        .as_deref()
        .and_then(|name| platforms.get(name))
        .ok_or_else(|| no_variant.clone())?;
    let (variant, weapon) = weapons
        .resolve(&profile.weapons, order.category)
        .ok_or(no_variant)?;

    let relative = firer_kin.position.relative(&target_position);
    if relative.range > weapon.max_range {
        return Err(CommandError::OutOfRange {
            range: relative.range,
            max_range: weapon.max_range,
        });
    }

    if let Ok(mut inventory) = world.get::<&mut WeaponInventory>(firer_entity) {
        match inventory.counts.get_mut(&order.category) {
            Some(rounds) if *rounds > 0 => *rounds -= 1,
            _ => return Err(CommandError::InventoryEmpty(order.category)),
        }
    }

    let munition = Munition {
        id: WeaponId(*next_weapon_id),
        category: order.category,
        variant: variant.to_string(),
        target: order.target,
        firer: order.firer,
        affiliation: firer_info.category.launch_affiliation(),
        launch_time,
    };
    *next_weapon_id += 1;

    world.spawn((
        munition.clone(),
        Kinematics {
            position: firer_kin.position,
            heading: relative.bearing,
            speed: WEAPON_LAUNCH_SPEED_KN,
            altitude: firer_kin.altitude,
            depth: firer_kin.depth,
        },
    ));

    tracing::info!(
        weapon = munition.id.0,
        firer = %order.firer,
        target_id = %order.target,
        variant = %munition.variant,
        range_nm = relative.range,
        time_to_go_s = ?guidance::time_to_go(relative.range, weapon.max_speed),
        "Weapon launched"
    );

    Ok(munition)
}
