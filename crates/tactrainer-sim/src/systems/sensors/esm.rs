//! Passive emitter intercept (ESM).
//!
//! One contact per (asset, emitter) pair, serialised on first intercept and
//! kept for the life of the scenario. A pair that stops radiating is only
//! marked inactive; its last bearing and last-seen tick stay frozen.

use std::collections::HashSet;

use tactrainer_core::catalog::PlatformCatalog;
use tactrainer_core::detections::EsmContact;
use tactrainer_core::events::SimEvent;

use super::{Contact, SensorOrigin, SensorState};

/// Whether `emitter` is one the contact's platform actually carries.
fn platform_emitter(platforms: &PlatformCatalog, contact: &Contact, emitter: &str) -> bool {
    contact
        .platform
        .as_deref()
        .and_then(|name| platforms.get(name))
        .is_some_and(|profile| profile.emitters.iter().any(|e| e == emitter))
}

/// Update intercepts for one tick.
pub fn run(
    origin: &SensorOrigin,
    contacts: &[Contact],
    platforms: &PlatformCatalog,
    state: &mut SensorState,
    enabled: bool,
    tick: u64,
    events: &mut Vec<SimEvent>,
) {
    let mut heard: HashSet<u32> = HashSet::new();

    if enabled {
        for contact in contacts {
            for (emitter, radiating) in &contact.emitters.states {
                if !radiating || !platform_emitter(platforms, contact, emitter) {
                    continue;
                }
                let bearing = origin
                    .kinematics
                    .position
                    .bearing_to(&contact.kinematics.position);

                let existing = state
                    .esm_contacts
                    .iter_mut()
                    .find(|c| c.asset == contact.id && &c.emitter == emitter);
                let serial = match existing {
                    Some(intercept) => {
                        intercept.bearing = bearing;
                        intercept.position = contact.kinematics.position;
                        intercept.last_seen_tick = tick;
                        intercept.active = true;
                        intercept.serial
                    }
                    None => {
                        let serial = state.next_esm_serial;
                        state.next_esm_serial += 1;
                        state.esm_contacts.push(EsmContact {
                            serial,
                            asset: contact.id,
                            emitter: emitter.clone(),
                            bearing,
                            position: contact.kinematics.position,
                            active: true,
                            last_seen_tick: tick,
                            visible: true,
                        });
                        tracing::info!(serial, asset = %contact.id, emitter = %emitter, "New ESM contact");
                        events.push(SimEvent::NewEsmContact {
                            serial,
                            asset: contact.id,
                            emitter: emitter.clone(),
                        });
                        serial
                    }
                };
                heard.insert(serial);
            }
        }
    }

    for intercept in &mut state.esm_contacts {
        if !heard.contains(&intercept.serial) {
            intercept.active = false;
        }
    }
}

/// Show or hide the line of bearing for one contact.
pub fn set_visibility(state: &mut SensorState, serial: u32, visible: bool) -> bool {
    match state.esm_contacts.iter_mut().find(|c| c.serial == serial) {
        Some(intercept) => {
            intercept.visible = visible;
            true
        }
        None => false,
    }
}
