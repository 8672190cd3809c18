//! IFF interrogator. Rides the radar sweep and hears only squawking transponders.

use tactrainer_core::detections::IffReturn;

use super::radar::{coverage, in_beam};
use super::{Contact, SensorOrigin, SensorState};

/// Record a reply from every squawking contact inside the beam.
pub fn run(origin: &SensorOrigin, contacts: &[Contact], state: &mut SensorState, tick: u64) {
    for contact in contacts.iter().filter(|c| c.transponder.squawk) {
        let Some(relative) = coverage(origin, contact) else {
            continue;
        };
        if !in_beam(relative.bearing, state.sweep_angle) {
            continue;
        }
        state.iff_returns.push(IffReturn {
            target: contact.id,
            target_position: contact.kinematics.position,
            ownship_position: origin.kinematics.position,
            bearing: relative.bearing,
            range: relative.range,
            created_tick: tick,
            mode1: contact.transponder.mode1.clone(),
            mode2: contact.transponder.mode2.clone(),
            mode3: contact.transponder.mode3.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactrainer_core::components::*;
    use tactrainer_core::enums::Domain;
    use tactrainer_core::types::GeoPoint;

    #[test]
    fn test_only_squawking_contacts_reply() {
        let origin = SensorOrigin {
            kinematics: Kinematics {
                position: GeoPoint::new(26.0, 54.0),
                altitude: 10_000.0,
                ..Default::default()
            },
            domain: Domain::Air,
        };
        let squawking = Contact {
            id: AssetId(2),
            domain: Domain::Air,
            platform: None,
            kinematics: Kinematics {
                position: GeoPoint::new(26.5, 54.0),
                altitude: 8000.0,
                ..Default::default()
            },
            transponder: Transponder {
                squawk: true,
                mode1: Some("12".into()),
                mode2: None,
                mode3: Some("4521".into()),
            },
            emitters: Emitters::default(),
        };
        let mut silent = squawking.clone();
        silent.id = AssetId(3);
        silent.transponder.squawk = false;

        let mut state = SensorState::default();
        run(&origin, &[squawking, silent], &mut state, 12);

        assert_eq!(state.iff_returns.len(), 1);
        let reply = &state.iff_returns[0];
        assert_eq!(reply.target, AssetId(2));
        assert_eq!(reply.mode3.as_deref(), Some("4521"));
        assert_eq!(reply.created_tick, 12);
    }
}
