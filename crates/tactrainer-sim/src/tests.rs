//! Tests for the simulation engine: command handling, the tick pipeline,
//! sensors, engagements and persistence.

use std::sync::Arc;

use tactrainer_core::catalog::{PlatformCatalog, WeaponCatalog};
use tactrainer_core::commands::{NewAsset, OperatorCommand, PositionInput, SensorParameter};
use tactrainer_core::components::*;
use tactrainer_core::enums::*;
use tactrainer_core::events::SimEvent;
use tactrainer_core::state::{AssetView, WorldSnapshot};
use tactrainer_core::types::GeoPoint;

use crate::engine::{SimConfig, SimulationEngine};
use crate::scenario::{AssetRecord, ScenarioDocument};
use crate::world_setup;

const PLATFORMS: &str = r#"{
    "air": [{
        "name": "Fighter",
        "maxSpeed": 1200, "maxAltitude": 50000, "maxTurn": 9, "maxClimb": 30000,
        "weapons": ["Slammer", "Harpoon-A"],
        "emitters": ["FCR"],
        "loadout": {"AAM": 4, "ASM": 2}
    }],
    "surface": [{
        "name": "Destroyer",
        "maxSpeed": 30, "maxTurn": 2,
        "weapons": ["Standard", "Harpoon-S"],
        "emitters": ["SPY", "NAV"]
    }],
    "subsurface": [{
        "name": "Diesel Sub",
        "maxSpeed": 20, "maxTurn": 1.5,
        "weapons": ["Heavyweight"]
    }]
}"#;

const WEAPONS: &str = r#"{
    "Slammer":     {"type": "AAM", "targetType": "air", "maxRange": 40, "maxSpeed": 2400, "maxAcceleration": 300},
    "Harpoon-A":   {"type": "ASM", "targetType": "surface", "maxRange": 40, "maxSpeed": 600, "maxAcceleration": 100},
    "Harpoon-S":   {"type": "ASM", "targetType": "surface", "maxRange": 60, "maxSpeed": 600, "maxAcceleration": 100},
    "Standard":    {"type": "SAM", "targetType": "air", "maxRange": 90, "maxSpeed": 2000, "maxAcceleration": 300},
    "Heavyweight": {"type": "TORPEDO", "targetType": "subsurface", "maxRange": 20, "maxSpeed": 55, "maxAcceleration": 5}
}"#;

const OWN: AssetId = AssetId(0);
const HOSTILE: AssetId = AssetId(1);

fn catalogs() -> (Arc<PlatformCatalog>, Arc<WeaponCatalog>) {
    (
        Arc::new(PlatformCatalog::from_json_str(PLATFORMS).unwrap()),
        Arc::new(WeaponCatalog::from_json_str(WEAPONS).unwrap()),
    )
}

fn record(
    id: u32,
    name: &str,
    category: Category,
    domain: Domain,
    platform: Option<&str>,
    position: GeoPoint,
) -> AssetRecord {
    let mut r = world_setup::default_ownship_record(AssetId(id));
    r.name = name.to_string();
    r.category = category;
    r.domain = domain;
    r.platform = platform.map(str::to_string);
    r.position = position;
    r
}

/// Airborne ownship at 10,000 ft over (26.0, 54.0) plus one surface hostile.
fn engine_with_hostile(hostile_position: GeoPoint) -> SimulationEngine {
    let (platforms, weapons) = catalogs();
    let mut engine = SimulationEngine::with_catalogs(SimConfig::default(), platforms, weapons);

    let mut own = record(0, "Viper", Category::Ownship, Domain::Air, Some("Fighter"), GeoPoint::new(26.0, 54.0));
    own.altitude = 10_000.0;
    let hostile = record(
        1,
        "Bandit",
        Category::Hostile,
        Domain::Surface,
        Some("Destroyer"),
        hostile_position,
    );
    engine
        .start_scenario(ScenarioDocument {
            assets: vec![own, hostile],
            ..Default::default()
        })
        .unwrap();
    engine
}

fn asset(snapshot: &WorldSnapshot, id: AssetId) -> Option<&AssetView> {
    snapshot.assets.iter().find(|a| a.id == id)
}

fn north_of_ownship(nm: f64) -> GeoPoint {
    GeoPoint::new(26.0 + nm / 60.0, 54.0)
}

// ---- Lifecycle and time ----

#[test]
fn test_default_engine_has_single_ownship() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();

    assert_eq!(snap.assets.len(), 1);
    let own = &snap.assets[0];
    assert_eq!(own.category, Category::Ownship);
    assert_eq!(own.name, world_setup::DEFAULT_OWNSHIP_NAME);
    assert_eq!(own.kinematics.position, world_setup::DEFAULT_OWNSHIP_POSITION);
    assert_eq!(snap.phase, SimPhase::Running);
}

#[test]
fn test_pause_resume() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 1);

    engine.queue_command(OperatorCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, SimPhase::Paused);
    let paused_tick = snap.time.tick;

    let snap = engine.tick();
    assert_eq!(snap.time.tick, paused_tick);

    engine.queue_command(OperatorCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, SimPhase::Running);
    assert_eq!(snap.time.tick, paused_tick + 1);
}

#[test]
fn test_commands_apply_while_paused() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        OperatorCommand::Pause,
        OperatorCommand::CreateGeoPoint {
            name: "IP".into(),
            position: GeoPoint::new(25.0, 55.0).into(),
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.geo_points.len(), 1);
    assert_eq!(snap.time.tick, 0);
}

#[test]
fn test_time_scale_zero_freezes_and_is_clamped() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(OperatorCommand::SetTimeScale { scale: 0.0 });
    let snap = engine.tick();
    assert_eq!(snap.time.tick, 0);
    assert_eq!(snap.time_scale, 0.0);

    engine.queue_command(OperatorCommand::SetTimeScale { scale: 10.0 });
    let snap = engine.tick();
    assert_eq!(snap.time_scale, 4.0);
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_mission_clock_runs_at_one_hertz() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut snap = engine.tick();
    for _ in 1..150 {
        snap = engine.tick();
    }
    assert_eq!(snap.time.tick, 150);
    assert_eq!(snap.mission_clock_secs, 2);
}

#[test]
fn test_restart_restores_scenario() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    engine.queue_commands([
        OperatorCommand::MoveAsset {
            asset_id: HOSTILE,
            position: GeoPoint::new(20.0, 50.0).into(),
        },
        OperatorCommand::DeleteGeoPoint { id: 99 },
    ]);
    for _ in 0..30 {
        engine.tick();
    }

    engine.queue_command(OperatorCommand::Restart);
    let snap = engine.tick();
    let hostile = asset(&snap, HOSTILE).unwrap();
    assert_eq!(hostile.kinematics.position, north_of_ownship(20.0));
    assert_eq!(snap.time.tick, 1);
}

// ---- Assets ----

#[test]
fn test_ownship_protected() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let own = engine.ownship_id().unwrap();

    engine.queue_commands([
        OperatorCommand::DeleteAsset { asset_id: own },
        OperatorCommand::SetCategory {
            asset_id: own,
            category: Category::Hostile,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(snap.assets.len(), 1);
    assert_eq!(snap.assets[0].category, Category::Ownship);
    assert_eq!(snap.alerts.len(), 2);
    assert!(snap.alerts.iter().all(|a| a.level == AlertLevel::Warning));
}

#[test]
fn test_create_asset_never_ownship() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let new_asset = |category| NewAsset {
        name: "Second".into(),
        category,
        domain: Domain::Surface,
        platform: None,
        position: GeoPoint::new(25.5, 54.5).into(),
        heading: 0.0,
        speed: 0.0,
        altitude: 0.0,
        depth: 0.0,
        transponder: Transponder::default(),
    };

    engine.execute(OperatorCommand::CreateAsset { asset: new_asset(Category::Ownship) })
        .unwrap_err();
    engine.execute(OperatorCommand::CreateAsset { asset: new_asset(Category::Neutral) })
        .unwrap();

    let snap = engine.snapshot();
    assert_eq!(snap.assets.len(), 2);
    assert_eq!(
        snap.assets.iter().filter(|a| a.category == Category::Ownship).count(),
        1
    );
    // Existing ids are never reused.
    assert_eq!(snap.assets[1].id, AssetId(1));
}

#[test]
fn test_retype_cannot_grant_ownship() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    let result = engine.execute(OperatorCommand::SetCategory {
        asset_id: HOSTILE,
        category: Category::Ownship,
    });
    assert!(result.is_err());
    engine
        .execute(OperatorCommand::SetCategory {
            asset_id: HOSTILE,
            category: Category::Neutral,
        })
        .unwrap();
    assert_eq!(
        asset(&engine.snapshot(), HOSTILE).unwrap().category,
        Category::Neutral
    );
}

#[test]
fn test_set_target_clamps_ownship_speed_and_altitude() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    engine.queue_commands([
        OperatorCommand::SetTarget {
            asset_id: OWN,
            field: TargetField::Speed,
            value: 500.0,
        },
        OperatorCommand::SetTarget {
            asset_id: OWN,
            field: TargetField::Altitude,
            value: 40_000.0,
        },
    ]);
    let snap = engine.tick();
    let own = asset(&snap, OWN).unwrap();
    assert_eq!(own.commanded.speed, Some(220.0));
    assert_eq!(own.commanded.altitude, Some(27_000.0));
}

#[test]
fn test_set_target_field_must_match_domain() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    assert_eq!(
        engine.execute(OperatorCommand::SetTarget {
            asset_id: HOSTILE,
            field: TargetField::Altitude,
            value: 1000.0,
        }),
        Err(tactrainer_core::error::CommandError::FieldNotApplicable {
            field: TargetField::Altitude,
            domain: Domain::Surface,
        })
    );
    // Platform max speed is 30 kn.
    engine
        .execute(OperatorCommand::SetTarget {
            asset_id: HOSTILE,
            field: TargetField::Speed,
            value: 45.0,
        })
        .unwrap();
    assert_eq!(asset(&engine.snapshot(), HOSTILE).unwrap().commanded.speed, Some(30.0));
}

#[test]
fn test_heading_ramps_at_turn_rate() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    engine.queue_command(OperatorCommand::SetTarget {
        asset_id: HOSTILE,
        field: TargetField::Heading,
        value: 90.0,
    });

    let mut previous = 0.0;
    for _ in 0..120 {
        let snap = engine.tick();
        let heading = asset(&snap, HOSTILE).unwrap().kinematics.heading;
        // Destroyer turns 2 deg/s.
        assert!(heading - previous <= 2.0 / 60.0 + 1e-9);
        previous = heading;
    }
    assert!((previous - 4.0).abs() < 1e-6);
}

#[test]
fn test_invalid_dmm_rejected_and_valid_dmm_applied() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    engine.queue_command(OperatorCommand::MoveAsset {
        asset_id: HOSTILE,
        position: PositionInput::Dmm("somewhere".into()),
    });
    let snap = engine.tick();
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(asset(&snap, HOSTILE).unwrap().kinematics.position, north_of_ownship(20.0));

    engine.queue_command(OperatorCommand::MoveAsset {
        asset_id: HOSTILE,
        position: PositionInput::Dmm("26 30.000N 054 00.000E".into()),
    });
    let snap = engine.tick();
    let position = asset(&snap, HOSTILE).unwrap().kinematics.position;
    assert!((position.lat - 26.5).abs() < 1e-9);
    assert!((position.lon - 54.0).abs() < 1e-9);
}

#[test]
fn test_emitter_toggle_requires_known_emitter() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    let snap = engine.snapshot();
    let emitters = &asset(&snap, HOSTILE).unwrap().emitters;
    assert_eq!(emitters.get("SPY"), Some(&true));
    assert_eq!(emitters.get("NAV"), Some(&true));

    assert!(engine
        .execute(OperatorCommand::SetEmitter {
            asset_id: HOSTILE,
            emitter: "JAMMER".into(),
            active: true,
        })
        .is_err());
}

// ---- Waypoints ----

#[test]
fn test_waypoint_reached_pops_and_retargets() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    let start = north_of_ownship(20.0);
    engine.queue_commands([
        OperatorCommand::AddWaypoint {
            asset_id: HOSTILE,
            index: None,
            position: GeoPoint::new(start.lat + 0.2 / 60.0, start.lon).into(),
        },
        OperatorCommand::AddWaypoint {
            asset_id: HOSTILE,
            index: None,
            position: GeoPoint::new(start.lat, start.lon + 0.5).into(),
        },
    ]);
    let snap = engine.tick();

    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::WaypointReached { asset, remaining: 1 } if *asset == HOSTILE)));
    let hostile = asset(&snap, HOSTILE).unwrap();
    assert_eq!(hostile.waypoints.len(), 1);
    let aim = hostile.commanded.heading.unwrap();
    assert!((aim - 90.0).abs() < 1.0);
}

#[test]
fn test_waypoint_index_errors() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    assert!(engine
        .execute(OperatorCommand::DeleteWaypoint {
            asset_id: HOSTILE,
            index: 0,
        })
        .is_err());
    assert!(engine
        .execute(OperatorCommand::ClearWaypoints { asset_id: AssetId(42) })
        .is_err());
}

// ---- Engagements ----

#[test]
fn test_fire_out_of_range_rejected() {
    let mut engine = engine_with_hostile(north_of_ownship(50.0));
    engine.queue_command(OperatorCommand::Fire {
        firer: OWN,
        target: HOSTILE,
        category: WeaponCategory::Asm,
    });
    let snap = engine.tick();

    assert!(snap.weapons.is_empty());
    assert_eq!(snap.inventory.get(&WeaponCategory::Asm), Some(&2));
    assert_eq!(snap.alerts.len(), 1);
    assert_eq!(snap.alerts[0].level, AlertLevel::Warning);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::FireRejected { category: WeaponCategory::Asm, .. })));
}

#[test]
fn test_fire_decrements_inventory_until_empty() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    let fire = || OperatorCommand::Fire {
        firer: OWN,
        target: HOSTILE,
        category: WeaponCategory::Asm,
    };

    engine.queue_command(fire());
    let snap = engine.tick();
    assert_eq!(snap.weapons.len(), 1);
    assert_eq!(snap.inventory.get(&WeaponCategory::Asm), Some(&1));
    let weapon = &snap.weapons[0];
    assert_eq!(weapon.munition.variant, "Harpoon-A");
    assert_eq!(weapon.munition.affiliation, Affiliation::Friendly);

    engine.execute(fire()).unwrap();
    assert_eq!(
        engine.execute(fire()),
        Err(tactrainer_core::error::CommandError::InventoryEmpty(WeaponCategory::Asm))
    );
    let snap = engine.tick();
    assert_eq!(snap.weapons.len(), 2);
    assert_eq!(snap.inventory.get(&WeaponCategory::Asm), Some(&0));
}

#[test]
fn test_fire_without_variant_rejected() {
    let mut engine = engine_with_hostile(north_of_ownship(5.0));
    let result = engine.execute(OperatorCommand::Fire {
        firer: OWN,
        target: HOSTILE,
        category: WeaponCategory::Torpedo,
    });
    assert!(matches!(
        result,
        Err(tactrainer_core::error::CommandError::NoWeaponVariant { .. })
    ));
    assert!(engine.snapshot().weapons.is_empty());
}

#[test]
fn test_weapon_impact_removes_target() {
    let mut engine = engine_with_hostile(north_of_ownship(2.0));
    engine.queue_command(OperatorCommand::Fire {
        firer: OWN,
        target: HOSTILE,
        category: WeaponCategory::Asm,
    });

    let mut impact = false;
    for _ in 0..3000 {
        let snap = engine.tick();
        impact |= snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::Impact { target, .. } if *target == HOSTILE));
        if impact {
            assert!(snap.weapons.is_empty());
            assert!(asset(&snap, HOSTILE).is_none());
            break;
        }
    }
    assert!(impact, "weapon never reached its target");
}

#[test]
fn test_ownship_hit_raises_critical_alert_only() {
    let mut engine = engine_with_hostile(north_of_ownship(1.0));
    engine.queue_command(OperatorCommand::Fire {
        firer: HOSTILE,
        target: OWN,
        category: WeaponCategory::Asm,
    });

    let mut critical = false;
    for _ in 0..3000 {
        let snap = engine.tick();
        if snap.alerts.iter().any(|a| a.level == AlertLevel::Critical) {
            critical = true;
            assert!(snap.weapons.is_empty());
            assert!(asset(&snap, OWN).is_some());
            break;
        }
    }
    assert!(critical);
}

#[test]
fn test_weapon_flies_straight_when_target_deleted() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    engine.queue_command(OperatorCommand::Fire {
        firer: OWN,
        target: HOSTILE,
        category: WeaponCategory::Asm,
    });
    engine.tick();
    engine.queue_command(OperatorCommand::DeleteAsset { asset_id: HOSTILE });
    let snap = engine.tick();
    let heading = snap.weapons[0].kinematics.heading;

    for _ in 0..60 {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(snap.weapons.len(), 1);
    assert_eq!(snap.weapons[0].kinematics.heading, heading);
}

// ---- Sensors ----

#[test]
fn test_radar_paints_contact_under_sweep() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    let snap = engine.tick();
    assert!((snap.radar.sweep_angle - 0.6).abs() < 1e-9);
    assert_eq!(snap.radar_returns.len(), 1);
    assert_eq!(snap.radar_returns[0].target, HOSTILE);
}

#[test]
fn test_radar_off_stops_sweep() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    engine.queue_command(OperatorCommand::ToggleSystem {
        system: SystemKind::Radar,
    });
    let snap = engine.tick();
    assert_eq!(snap.radar.sweep_angle, 0.0);
    assert!(snap.radar_returns.is_empty());
    assert!(!snap.systems.radar);
}

fn submarine_engine(depth: f64) -> SimulationEngine {
    let (platforms, weapons) = catalogs();
    let mut engine = SimulationEngine::with_catalogs(SimConfig::default(), platforms, weapons);
    let mut own = record(0, "Viper", Category::Ownship, Domain::Air, Some("Fighter"), GeoPoint::new(26.0, 54.0));
    own.altitude = 10_000.0;
    let mut sub = record(1, "Kilo", Category::Hostile, Domain::Subsurface, Some("Diesel Sub"), north_of_ownship(30.0));
    sub.depth = depth;
    engine
        .start_scenario(ScenarioDocument {
            assets: vec![own, sub],
            ..Default::default()
        })
        .unwrap();
    engine
}

#[test]
fn test_submerged_contact_hidden_from_radar() {
    let mut deep = submarine_engine(20.0);
    let mut shallow = submarine_engine(10.0);
    assert!(deep.tick().radar_returns.is_empty());
    assert_eq!(shallow.tick().radar_returns.len(), 1);
}

#[test]
fn test_esm_contact_goes_inactive_when_esm_off() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    let snap = engine.tick();
    assert_eq!(snap.esm_contacts.len(), 2);
    assert!(snap.esm_contacts.iter().all(|c| c.active));
    let serials: Vec<u32> = snap.esm_contacts.iter().map(|c| c.serial).collect();

    engine.queue_command(OperatorCommand::ToggleSystem {
        system: SystemKind::Esm,
    });
    let snap = engine.tick();
    assert_eq!(snap.esm_contacts.len(), 2);
    assert!(snap.esm_contacts.iter().all(|c| !c.active));

    // Back on: same serials, no new contacts.
    engine.queue_command(OperatorCommand::ToggleSystem {
        system: SystemKind::Esm,
    });
    let snap = engine.tick();
    let again: Vec<u32> = snap.esm_contacts.iter().map(|c| c.serial).collect();
    assert_eq!(serials, again);
}

#[test]
fn test_esm_visibility_toggle() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    let serial = engine.tick().esm_contacts[0].serial;
    engine.queue_command(OperatorCommand::SetEsmVisibility {
        serial,
        visible: false,
    });
    let snap = engine.tick();
    assert!(!snap.esm_contacts.iter().find(|c| c.serial == serial).unwrap().visible);
    assert!(engine
        .execute(OperatorCommand::SetEsmVisibility {
            serial: 999,
            visible: true,
        })
        .is_err());
}

#[test]
fn test_buoy_deploys_under_ownship_and_hears_submarine() {
    let (platforms, weapons) = catalogs();
    let mut engine = SimulationEngine::with_catalogs(SimConfig::default(), platforms, weapons);
    let own = record(0, "Orion", Category::Ownship, Domain::Air, None, GeoPoint::new(26.0, 54.0));
    let sub = record(1, "Kilo", Category::Hostile, Domain::Subsurface, None, north_of_ownship(3.0));
    engine
        .start_scenario(ScenarioDocument {
            assets: vec![own, sub],
            ..Default::default()
        })
        .unwrap();

    engine.queue_command(OperatorCommand::DeployBuoy { position: None });
    let snap = engine.tick();
    assert_eq!(snap.sonobuoys.len(), 1);
    assert_eq!(snap.sonobuoys[0].position, GeoPoint::new(26.0, 54.0));
    assert_eq!(snap.acoustic_detections.len(), 1);
    assert_eq!(snap.acoustic_detections[0].asset, HOSTILE);
}

#[test]
fn test_bearing_line_anchored_at_ownship() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(OperatorCommand::CreateBearingLine { bearing: 370.0 });
    let snap = engine.tick();
    assert_eq!(snap.bearing_lines.len(), 1);
    assert_eq!(snap.bearing_lines[0].origin, world_setup::DEFAULT_OWNSHIP_POSITION);
    assert!((snap.bearing_lines[0].bearing - 10.0).abs() < 1e-9);
}

#[test]
fn test_return_decay_parameter() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    engine.queue_command(OperatorCommand::SetSensorParameter {
        parameter: SensorParameter::ReturnDecaySecs(0.5),
    });
    assert_eq!(engine.tick().radar_returns.len(), 1);
    for _ in 0..40 {
        engine.tick();
    }
    assert!(engine.tick().radar_returns.is_empty());

    assert!(engine
        .execute(OperatorCommand::SetSensorParameter {
            parameter: SensorParameter::ReturnDecaySecs(-1.0),
        })
        .is_err());
}

// ---- Datalink ----

fn enroll(engine: &mut SimulationEngine, asset_id: AssetId, network: &str, code: &str) {
    engine
        .execute(OperatorCommand::SetAssetDatalink {
            asset_id,
            datalink: DatalinkState {
                network_id: Some(network.into()),
                unit_code: Some(code.into()),
                track_block_start: Some(7000),
                track_block_end: Some(7077),
                active: false,
            },
        })
        .unwrap();
}

fn configure_datalink(engine: &mut SimulationEngine) {
    engine.queue_commands([
        OperatorCommand::SetSensorParameter {
            parameter: SensorParameter::DatalinkNetwork(Some("NET1".into())),
        },
        OperatorCommand::SetSensorParameter {
            parameter: SensorParameter::TrackBlock { start: 100, end: 199 },
        },
        OperatorCommand::ToggleSystem {
            system: SystemKind::Datalink,
        },
    ]);
}

#[test]
fn test_datalink_participant_shown_friendly() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    enroll(&mut engine, HOSTILE, "NET1", "00012");
    configure_datalink(&mut engine);
    let snap = engine.tick();

    let hostile = asset(&snap, HOSTILE).unwrap();
    assert_eq!(hostile.category, Category::Friendly);
    assert_eq!(hostile.track_number, Some(12));
    // Leading zeros of the unit code survive in the displayed label.
    assert_eq!(hostile.track_label.as_deref(), Some("00012"));
    assert!(hostile.datalink.active);
}

#[test]
fn test_datalink_rejects_bad_unit_code() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    let result = engine.execute(OperatorCommand::SetAssetDatalink {
        asset_id: HOSTILE,
        datalink: DatalinkState {
            unit_code: Some("12".into()),
            ..Default::default()
        },
    });
    assert!(result.is_err());
}

#[test]
fn test_report_track_assigns_from_block() {
    let mut engine = engine_with_hostile(north_of_ownship(30.0));
    engine.queue_command(OperatorCommand::ReportTrack { asset_id: HOSTILE });
    let snap = engine.tick();
    // Datalink is off by default.
    assert_eq!(snap.alerts.len(), 1);

    configure_datalink(&mut engine);
    engine.queue_command(OperatorCommand::ReportTrack { asset_id: HOSTILE });
    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::TrackReported { asset, track_number: 100 } if *asset == HOSTILE
    )));
    assert_eq!(asset(&snap, HOSTILE).unwrap().track_number, Some(100));
    assert_eq!(asset(&snap, HOSTILE).unwrap().track_label.as_deref(), Some("00100"));
    assert_eq!(snap.datalink.next_track_number, 101);
}

// ---- Persistence ----

#[test]
fn test_save_load_round_trip_through_commands() {
    let dir = std::env::temp_dir().join("tactrainer_engine_save_load");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("mission.json").display().to_string();

    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    engine.queue_commands([
        OperatorCommand::Fire {
            firer: OWN,
            target: HOSTILE,
            category: WeaponCategory::Asm,
        },
        OperatorCommand::DeployBuoy { position: None },
        OperatorCommand::CreateGeoPoint {
            name: "CAP".into(),
            position: GeoPoint::new(26.2, 54.2).into(),
        },
    ]);
    for _ in 0..90 {
        engine.tick();
    }
    let before = engine.to_document();
    engine.execute(OperatorCommand::SaveScenario { path: path.clone() }).unwrap();

    let mut other = engine_with_hostile(north_of_ownship(5.0));
    other.execute(OperatorCommand::LoadScenario { path }).unwrap();
    let after = other.to_document();

    let close = |a: GeoPoint, b: GeoPoint| (a.lat - b.lat).abs() < 1e-9 && (a.lon - b.lon).abs() < 1e-9;
    assert_eq!(after.assets.len(), before.assets.len());
    for (a, b) in after.assets.iter().zip(&before.assets) {
        assert_eq!((a.id, &a.name, a.category), (b.id, &b.name, b.category));
        assert!(close(a.position, b.position));
        assert_eq!(a.emitters, b.emitters);
    }
    assert_eq!(after.weapons.len(), 1);
    assert_eq!(after.weapons[0].munition.id, before.weapons[0].munition.id);
    assert!(close(after.weapons[0].kinematics.position, before.weapons[0].kinematics.position));
    // Launch and deploy stamps are saved relative to the save time, so ages
    // carry across the reload instead of going negative.
    assert!(before.weapons[0].munition.launch_time < 0.0);
    assert!((after.weapons[0].munition.launch_time - before.weapons[0].munition.launch_time).abs() < 1e-9);
    assert!(before.sonobuoys[0].deploy_time < 0.0);
    let reloaded = other.snapshot();
    assert!(reloaded.weapons[0].munition.launch_time <= reloaded.time.elapsed_secs);
    assert!(reloaded.sonobuoys[0].deploy_time <= reloaded.time.elapsed_secs);
    assert_eq!(after.next_asset_id, before.next_asset_id);
    assert_eq!(after.inventory.get(&WeaponCategory::Asm), Some(&1));
    assert_eq!(after.next_weapon_id, before.next_weapon_id);
    assert_eq!(after.next_buoy_id, before.next_buoy_id);
    assert_eq!(after.annotations.geo_points.len(), 1);
    assert_eq!(after.annotations.next_geo_point_id, before.annotations.next_geo_point_id);
    assert_eq!(after.mission_clock_secs, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_failure_keeps_world() {
    let mut engine = engine_with_hostile(north_of_ownship(20.0));
    let missing = std::env::temp_dir().join("tactrainer_missing_scenario.json");
    let _ = std::fs::remove_file(&missing);

    engine.queue_command(OperatorCommand::LoadScenario {
        path: missing.display().to_string(),
    });
    let snap = engine.tick();
    assert_eq!(snap.alerts.len(), 1);
    assert!(asset(&snap, HOSTILE).is_some());
}

#[test]
fn test_loaded_ownship_held_to_performance_ceiling() {
    let (platforms, weapons) = catalogs();
    let mut engine = SimulationEngine::with_catalogs(SimConfig::default(), platforms, weapons);
    let mut own = record(0, "Viper", Category::Ownship, Domain::Air, Some("Fighter"), GeoPoint::new(26.0, 54.0));
    own.speed = 400.0;
    own.altitude = 40_000.0;
    own.commanded.speed = Some(300.0);
    own.commanded.altitude = Some(35_000.0);
    engine
        .start_scenario(ScenarioDocument {
            assets: vec![own],
            ..Default::default()
        })
        .unwrap();

    let snap = engine.snapshot();
    let view = asset(&snap, OWN).unwrap();
    assert_eq!(view.kinematics.speed, 220.0);
    assert_eq!(view.kinematics.altitude, 27_000.0);

    let mut snap = engine.tick();
    for _ in 0..60 {
        snap = engine.tick();
    }
    let view = asset(&snap, OWN).unwrap();
    assert_eq!(view.kinematics.speed, 220.0);
    assert_eq!(view.kinematics.altitude, 27_000.0);
    // Targets are reachable, so they are met and cleared.
    assert_eq!(view.commanded.speed, None);
    assert_eq!(view.commanded.altitude, None);
}

#[test]
fn test_snapshot_deterministic() {
    let mut a = engine_with_hostile(north_of_ownship(20.0));
    let mut b = engine_with_hostile(north_of_ownship(20.0));
    let commands = [
        OperatorCommand::SetTarget {
            asset_id: HOSTILE,
            field: TargetField::Speed,
            value: 25.0,
        },
        OperatorCommand::Fire {
            firer: OWN,
            target: HOSTILE,
            category: WeaponCategory::Asm,
        },
    ];
    a.queue_commands(commands.clone());
    b.queue_commands(commands);

    for _ in 0..300 {
        let json_a = serde_json::to_string(&a.tick()).unwrap();
        let json_b = serde_json::to_string(&b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged");
    }
}
