//! Datalink identity reconciliation and manual track reporting.
//!
//! While the ownship link is up and configured, every asset enrolled on the
//! same network with a valid unit code is a participant: shown friendly,
//! marked active, and numbered by its unit code.

use hecs::World;

use tactrainer_core::components::*;
use tactrainer_core::constants::UNIT_CODE_DIGITS;
use tactrainer_core::enums::Category;
use tactrainer_core::error::CommandError;
use tactrainer_core::state::DatalinkConfig;

use crate::world_setup::AssetIndex;

/// A unit code is exactly five ASCII digits.
pub fn valid_unit_code(code: &str) -> bool {
    code.len() == UNIT_CODE_DIGITS && code.bytes().all(|b| b.is_ascii_digit())
}

/// Whether an asset's enrolment makes it a participant on `config`'s network.
pub fn participates(state: &DatalinkState, config: &DatalinkConfig) -> bool {
    config.network_id.is_some()
        && state.network_id == config.network_id
        && state.unit_code.as_deref().is_some_and(valid_unit_code)
        && state.track_block_start.is_some()
        && state.track_block_end.is_some()
}

/// Reconcile identities for one tick.
pub fn run(world: &mut World, enabled: bool, config: &DatalinkConfig) {
    let link_up = enabled && config.is_configured();

    for (_entity, (id, info, state, own)) in world.query_mut::<(
        &AssetId,
        &mut AssetInfo,
        &mut DatalinkState,
        Option<&OwnShip>,
    )>() {
        if own.is_some() {
            continue;
        }
        if link_up && participates(state, config) {
            if !state.active {
                tracing::info!(asset = %id, unit_code = ?state.unit_code, "Datalink participant joined");
            }
            state.active = true;
            info.category = Category::Friendly;
            info.track_number = state.unit_code.as_deref().and_then(|c| c.parse().ok());
        } else if state.active {
            tracing::info!(asset = %id, "Datalink participant dropped");
            state.active = false;
        }
    }
}

/// Assign the next number from the ownship track block to `asset`.
///
/// Returns `None` when the asset already carries a number from the block or is
/// an active participant.
pub fn report_track(
    world: &mut World,
    index: &AssetIndex,
    enabled: bool,
    config: &mut DatalinkConfig,
    asset: AssetId,
) -> Result<Option<u32>, CommandError> {
    let entity = index.entity(asset)?;
    if world.get::<&OwnShip>(entity).is_ok() {
        return Err(CommandError::OwnshipProtected("report track"));
    }
    if !enabled {
        return Err(CommandError::DatalinkDisabled);
    }
    if !config.is_configured() {
        return Err(CommandError::DatalinkNotConfigured);
    }

    let (info, state) = world
        .query_one_mut::<(&mut AssetInfo, &DatalinkState)>(entity)
        .map_err(|_| CommandError::AssetNotFound(asset))?;
    let enrolled = state.active || info.track_number.is_some_and(|n| config.block_contains(n));
    if enrolled {
        return Ok(None);
    }

    let end = config.track_block_end.unwrap_or(0);
    let number = config.next_track_number;
    if number > end {
        return Err(CommandError::TrackBlockExhausted { end });
    }
    config.next_track_number += 1;
    info.track_number = Some(number);
    tracing::info!(asset = %asset, track_number = number, "Track reported");
    Ok(Some(number))
}

/// Reserve a new track block; numbering restarts at its first number.
pub fn set_track_block(config: &mut DatalinkConfig, start: u32, end: u32) -> Result<(), CommandError> {
    if start > end {
        return Err(CommandError::InvalidValue(format!(
            "track block start {start} is after end {end}"
        )));
    }
    config.track_block_start = Some(start);
    config.track_block_end = Some(end);
    config.next_track_number = start;
    Ok(())
}
