//! Pursuit guidance for munitions.
//!
//! A guided munition flies straight at its target's current position: speed
//! ramps toward the variant's maximum, heading turns toward the line of sight
//! at a capped rate. Without a target it keeps its last heading and speed.

use tactrainer_core::catalog::WeaponProfile;
use tactrainer_core::components::Kinematics;
use tactrainer_core::constants::WEAPON_MAX_TURN_RATE_DEG_S;
use tactrainer_core::geo::{flat_earth_step, normalize_heading, shortest_turn};
use tactrainer_core::types::GeoPoint;

/// Heading after turning from `current` toward `desired` for `dt` seconds.
pub fn pursuit_heading(current: f64, desired: f64, dt: f64) -> f64 {
    let max_turn = WEAPON_MAX_TURN_RATE_DEG_S * dt;
    let delta = shortest_turn(current, desired).clamp(-max_turn, max_turn);
    normalize_heading(current + delta)
}

/// Speed after accelerating toward `max_speed` for `dt` seconds.
pub fn pursuit_speed(current: f64, max_speed: f64, max_accel: f64, dt: f64) -> f64 {
    let delta = max_speed - current;
    let step = (max_accel * dt).min(delta.abs());
    current + step.copysign(delta)
}

/// Advance one munition by `dt`.
///
/// `target` is the target's position this tick, or `None` once it is gone.
/// `profile` is `None` when the variant has left the catalog; the munition
/// then holds its speed.
pub fn step(kin: &mut Kinematics, target: Option<GeoPoint>, profile: Option<&WeaponProfile>, dt: f64) {
    if let Some(target) = target {
        if let Some(profile) = profile {
            kin.speed = pursuit_speed(kin.speed, profile.max_speed, profile.max_acceleration, dt);
        }
        let desired = kin.position.bearing_to(&target);
        kin.heading = pursuit_heading(kin.heading, desired, dt);
    }
    kin.position = flat_earth_step(&kin.position, kin.heading, kin.speed, dt);
}

/// Time to close `range_nm` at `speed_kn`, in seconds. `None` when not moving.
pub fn time_to_go(range_nm: f64, speed_kn: f64) -> Option<f64> {
    (speed_kn > 0.0).then(|| range_nm / speed_kn * 3600.0)
}
