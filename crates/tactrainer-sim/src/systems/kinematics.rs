//! Kinematic integration system.
//!
//! Ramps heading, speed, altitude and depth toward their commanded values at
//! the platform's rate limits, then advances position one flat-earth step.

use hecs::World;

use tactrainer_core::catalog::{PerformanceLimits, PlatformCatalog};
use tactrainer_core::components::{AssetInfo, Commanded, Kinematics, OwnShip};
use tactrainer_core::constants::*;
use tactrainer_core::geo::{flat_earth_step, normalize_heading, shortest_turn};

/// Run kinematic integration for every asset. Munitions are moved by guidance.
pub fn run(world: &mut World, platforms: &PlatformCatalog, dt: f64) {
    for (_entity, (info, kin, commanded, own)) in world.query_mut::<(
        &AssetInfo,
        &mut Kinematics,
        &mut Commanded,
        Option<&OwnShip>,
    )>() {
        let profile = info.platform.as_deref().and_then(|name| platforms.get(name));
        let limits = PerformanceLimits::for_asset(info.domain, profile);

        if let Some(target) = commanded.heading {
            let (heading, reached) = turn_toward(kin.heading, target, limits.turn_rate_deg_s * dt);
            kin.heading = heading;
            if reached {
                commanded.heading = None;
            }
        }

        if let Some(target) = commanded.speed {
            let (speed, reached) = ramp(kin.speed, target, limits.accel_kn_s * dt, SPEED_SNAP_KN);
            kin.speed = speed.max(0.0);
            if reached {
                commanded.speed = None;
            }
        }

        if info.domain.has_altitude() {
            if let Some(target) = commanded.altitude {
                let (altitude, reached) =
                    ramp(kin.altitude, target, limits.climb_rate_ft_s * dt, ALTITUDE_SNAP_FT);
                kin.altitude = altitude.max(0.0);
                if reached {
                    commanded.altitude = None;
                }
            }
        }

        if info.domain.has_depth() {
            if let Some(target) = commanded.depth {
                let (depth, reached) =
                    ramp(kin.depth, target, limits.depth_rate_ft_s * dt, ALTITUDE_SNAP_FT);
                kin.depth = depth.max(0.0);
                if reached {
                    commanded.depth = None;
                }
            }
        }

        if own.is_some() {
            kin.speed = kin.speed.min(OWNSHIP_MAX_SPEED_KN);
            kin.altitude = kin.altitude.min(OWNSHIP_MAX_ALTITUDE_FT);
        }

        kin.position = flat_earth_step(&kin.position, kin.heading, kin.speed, dt);
    }
}

/// Move `current` toward `target` by at most `max_step`, snapping inside `snap`.
///
/// Returns the new value and whether the target was reached.
pub fn ramp(current: f64, target: f64, max_step: f64, snap: f64) -> (f64, bool) {
    let delta = target - current;
    if delta.abs() <= snap {
        return (target, true);
    }
    let step = max_step.min(delta.abs());
    (current + step.copysign(delta), false)
}

/// Turn the short way round toward `target`, by at most `max_step` degrees.
pub fn turn_toward(current: f64, target: f64, max_step: f64) -> (f64, bool) {
    let delta = shortest_turn(current, target);
    if delta.abs() <= HEADING_SNAP_DEG {
        return (normalize_heading(target), true);
    }
    let step = max_step.min(delta.abs());
    (normalize_heading(current + step.copysign(delta)), false)
}
