//! Rotating search radar.
//!
//! The antenna sweeps clockwise at a fixed rate. A contact is painted when the
//! sweep line passes within the beam half-width of its bearing, provided it is
//! inside instrumented range and above the radar horizon.

use tactrainer_core::constants::*;
use tactrainer_core::detections::RadarReturn;
use tactrainer_core::enums::Domain;
use tactrainer_core::geo::{angular_separation, normalize_heading, radar_horizon_nm};
use tactrainer_core::types::RelativePosition;

use super::{Contact, SensorOrigin, SensorState};

/// Advance the sweep one tick.
pub fn advance_sweep(state: &mut SensorState) {
    state.sweep_angle = normalize_heading(state.sweep_angle + RADAR_SWEEP_DEG_PER_TICK);
}

/// Whether a bearing is inside the beam.
pub fn in_beam(bearing: f64, sweep_angle: f64) -> bool {
    angular_separation(bearing, sweep_angle) <= RADAR_BEAM_HALF_WIDTH_DEG
}

/// Height used for horizon geometry: altitude in the air, sea level otherwise.
fn horizon_height(domain: Domain, altitude: f64) -> f64 {
    if domain.has_altitude() {
        altitude
    } else {
        0.0
    }
}

/// Relative position of `contact` if the radar could see it at all.
///
/// Shared with IFF, which rides on the same antenna.
pub fn coverage(origin: &SensorOrigin, contact: &Contact) -> Option<RelativePosition> {
    if contact.domain == Domain::Subsurface && contact.kinematics.depth > RADAR_MAX_DETECT_DEPTH_FT
    {
        return None;
    }

    let relative = origin
        .kinematics
        .position
        .relative(&contact.kinematics.position);
    if relative.range > RADAR_MAX_RANGE_NM {
        return None;
    }

    let horizon = radar_horizon_nm(
        horizon_height(origin.domain, origin.kinematics.altitude),
        horizon_height(contact.domain, contact.kinematics.altitude),
    );
    (relative.range <= horizon).then_some(relative)
}

/// Paint every covered contact inside the beam.
pub fn run(origin: &SensorOrigin, contacts: &[Contact], state: &mut SensorState, tick: u64) {
    for contact in contacts {
        let Some(relative) = coverage(origin, contact) else {
            continue;
        };
        if !in_beam(relative.bearing, state.sweep_angle) {
            continue;
        }
        tracing::debug!(
            target_id = contact.id.0,
            bearing = relative.bearing,
            range = relative.range,
            "Radar paint"
        );
        state.radar_returns.push(RadarReturn {
            target: contact.id,
            target_position: contact.kinematics.position,
            ownship_position: origin.kinematics.position,
            bearing: relative.bearing,
            range: relative.range,
            created_tick: tick,
        });
    }
}
