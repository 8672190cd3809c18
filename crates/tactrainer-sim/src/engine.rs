//! Simulation engine for the tactical trainer.
//!
//! `SimulationEngine` owns the hecs ECS world and every piece of engine state,
//! applies operator commands between ticks, runs all systems in a fixed order,
//! and produces `WorldSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use hecs::World;

use tactrainer_core::catalog::{PerformanceLimits, PlatformCatalog, WeaponCatalog};
use tactrainer_core::commands::{NewAsset, OperatorCommand, SensorParameter};
use tactrainer_core::components::*;
use tactrainer_core::constants::*;
use tactrainer_core::enums::*;
use tactrainer_core::error::{CommandError, ScenarioError};
use tactrainer_core::events::{Alert, SimEvent};
use tactrainer_core::geo::normalize_heading;
use tactrainer_core::state::{DatalinkConfig, SystemStates, WorldSnapshot};
use tactrainer_core::types::{GeoPoint, SimTime};

use crate::annotations::Annotations;
use crate::scenario::{AssetRecord, ScenarioDocument};
use crate::systems;
use crate::systems::fire_control::FireOrder;
use crate::systems::sensors::{self, SensorState};
use crate::systems::snapshot::SnapshotSource;
use crate::world_setup::{self, AssetIndex};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Initial time scale (1.0 = normal, 0.0 = frozen).
    pub time_scale: f64,
    /// Age at which radar and IFF returns are purged.
    pub return_decay_secs: f64,
    /// Initial ownship system power states.
    pub systems: SystemStates,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            return_decay_secs: DEFAULT_RETURN_DECAY_SECS,
            systems: SystemStates::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    assets: AssetIndex,
    time: SimTime,
    phase: SimPhase,
    time_scale: f64,
    mission_clock_secs: u64,
    sensors: SensorState,
    annotations: Annotations,
    systems: SystemStates,
    datalink: DatalinkConfig,
    next_weapon_id: u32,
    platforms: Arc<PlatformCatalog>,
    weapons: Arc<WeaponCatalog>,
    /// Scenario a restart returns to.
    initial: ScenarioDocument,
    command_queue: VecDeque<OperatorCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    alerts: Vec<Alert>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine with empty catalogs and a default ownship.
    pub fn new(config: SimConfig) -> Self {
        Self::with_catalogs(
            config,
            Arc::new(PlatformCatalog::default()),
            Arc::new(WeaponCatalog::default()),
        )
    }

    /// Create an engine sharing the given catalogs, with a default ownship.
    pub fn with_catalogs(
        config: SimConfig,
        platforms: Arc<PlatformCatalog>,
        weapons: Arc<WeaponCatalog>,
    ) -> Self {
        let return_decay_secs = if config.return_decay_secs.is_finite() && config.return_decay_secs > 0.0 {
            config.return_decay_secs
        } else {
            tracing::warn!(decay = config.return_decay_secs, "Invalid return decay; using default");
            DEFAULT_RETURN_DECAY_SECS
        };
        let mut initial = ScenarioDocument {
            systems: config.systems,
            return_decay_secs,
            ..Default::default()
        };
        if let Err(err) = initial.normalize() {
            tracing::warn!(error = %err, "Default scenario failed to normalize");
        }

        let mut engine = Self {
            world: World::new(),
            assets: AssetIndex::default(),
            time: SimTime::default(),
            phase: SimPhase::default(),
            time_scale: config.time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE),
            mission_clock_secs: 0,
            sensors: SensorState::default(),
            annotations: Annotations::default(),
            systems: config.systems,
            datalink: DatalinkConfig::default(),
            next_weapon_id: 0,
            platforms,
            weapons,
            initial: initial.clone(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            alerts: Vec::new(),
            events: Vec::new(),
        };
        engine.load_document(initial);
        engine
    }

    /// Replace the world with `doc` and make it the restart point.
    pub fn start_scenario(&mut self, mut doc: ScenarioDocument) -> Result<(), ScenarioError> {
        doc.normalize()?;
        self.initial = doc.clone();
        self.load_document(doc);
        Ok(())
    }

    /// Queue an operator command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: OperatorCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = OperatorCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> WorldSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running && self.time_scale > 0.0 {
            self.run_systems();
            self.time.advance();
            if self.time.tick % TICK_RATE as u64 == 0 {
                self.mission_clock_secs += 1;
            }
        }

        let alerts = std::mem::take(&mut self.alerts);
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.snapshot_source(), alerts, events)
    }

    /// Current state without consuming pending alerts or events.
    pub fn snapshot(&self) -> WorldSnapshot {
        systems::snapshot::build_snapshot(&self.snapshot_source(), Vec::new(), Vec::new())
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn sensors(&self) -> &SensorState {
        &self.sensors
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn datalink(&self) -> &DatalinkConfig {
        &self.datalink
    }

    pub fn systems(&self) -> SystemStates {
        self.systems
    }

    pub fn ownship_id(&self) -> Option<AssetId> {
        world_setup::find_ownship(&self.world).map(|(_, id)| id)
    }

    /// Capture the whole world as a scenario document.
    pub fn to_document(&self) -> ScenarioDocument {
        let mut assets: Vec<AssetRecord> = self
            .world
            .query::<(
                &AssetId,
                &AssetInfo,
                &Kinematics,
                &Commanded,
                &WaypointQueue,
                &Transponder,
                &DatalinkState,
                &Emitters,
            )>()
            .iter()
            .map(
                |(_, (id, info, kin, commanded, route, transponder, datalink, emitters))| {
                    AssetRecord {
                        id: *id,
                        name: info.name.clone(),
                        category: info.category,
                        domain: info.domain,
                        platform: info.platform.clone(),
                        position: kin.position,
                        heading: kin.heading,
                        speed: kin.speed,
                        altitude: kin.altitude,
                        depth: kin.depth,
                        commanded: *commanded,
                        waypoints: route.points.iter().copied().collect(),
                        track_number: info.track_number,
                        transponder: transponder.clone(),
                        datalink: datalink.clone(),
                        emitters: emitters.states.clone(),
                    }
                },
            )
            .collect();
        assets.sort_by_key(|a| a.id);

        // Time restarts at zero on load, so stamps are stored relative to now.
        let now = self.time.elapsed_secs;
        let snapshot = self.snapshot();
        let weapons = snapshot
            .weapons
            .into_iter()
            .map(|mut view| {
                view.munition.launch_time -= now;
                view
            })
            .collect();
        let sonobuoys = self
            .sensors
            .sonobuoys
            .iter()
            .map(|buoy| Sonobuoy {
                deploy_time: buoy.deploy_time - now,
                ..*buoy
            })
            .collect();

        ScenarioDocument {
            version: SCENARIO_VERSION,
            name: self.initial.name.clone(),
            assets,
            next_asset_id: self.assets.next_id(),
            weapons,
            next_weapon_id: self.next_weapon_id,
            inventory: snapshot.inventory,
            sonobuoys,
            next_buoy_id: self.sensors.next_buoy_id,
            mission_clock_secs: self.mission_clock_secs,
            datalink: self.datalink.clone(),
            systems: self.systems,
            return_decay_secs: self.sensors.return_decay_secs,
            annotations: self.annotations.clone(),
        }
    }

    /// Rebuild all state from a normalized document. Time restarts at zero.
    fn load_document(&mut self, doc: ScenarioDocument) {
        self.world.clear();
        self.assets.reset(doc.next_asset_id);
        self.despawn_buffer.clear();

        for record in &doc.assets {
            let mut record = record.clone();
            if record.emitters.is_empty() {
                record.emitters =
                    world_setup::default_emitters(&self.platforms, record.platform.as_deref());
            }
            let inventory = (record.category == Category::Ownship).then(|| {
                if doc.inventory.is_empty() {
                    world_setup::default_inventory(&self.platforms, record.platform.as_deref())
                } else {
                    WeaponInventory {
                        counts: doc.inventory.clone(),
                    }
                }
            });
            world_setup::spawn_asset(&mut self.world, &mut self.assets, &record, inventory);
        }

        for weapon in &doc.weapons {
            self.world
                .spawn((weapon.munition.clone(), weapon.kinematics));
        }

        self.time = SimTime::default();
        self.mission_clock_secs = doc.mission_clock_secs;
        self.sensors = SensorState {
            return_decay_secs: doc.return_decay_secs,
            sonobuoys: doc.sonobuoys.clone(),
            next_buoy_id: doc.next_buoy_id,
            ..Default::default()
        };
        self.annotations = doc.annotations.clone();
        self.systems = doc.systems;
        self.datalink = doc.datalink.clone();
        self.next_weapon_id = doc.next_weapon_id;

        tracing::info!(
            name = ?doc.name,
            assets = self.assets.len(),
            weapons = doc.weapons.len(),
            "Scenario loaded"
        );
    }

    fn snapshot_source(&self) -> SnapshotSource<'_> {
        SnapshotSource {
            world: &self.world,
            time: self.time,
            phase: self.phase,
            time_scale: self.time_scale,
            mission_clock_secs: self.mission_clock_secs,
            sensors: &self.sensors,
            annotations: &self.annotations,
            systems: self.systems,
            datalink: &self.datalink,
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.execute(command) {
                tracing::warn!(error = %err, "Command rejected");
                self.alerts.push(Alert {
                    level: AlertLevel::Warning,
                    message: err.to_string(),
                    tick: self.time.tick,
                });
            }
        }
    }

    /// Apply one command immediately. A rejected command changes nothing.
    pub fn execute(&mut self, command: OperatorCommand) -> Result<(), CommandError> {
        match command {
            OperatorCommand::Pause => {
                self.phase = SimPhase::Paused;
            }
            OperatorCommand::Resume => {
                self.phase = SimPhase::Running;
            }
            OperatorCommand::SetTimeScale { scale } => {
                if !scale.is_finite() {
                    return Err(CommandError::InvalidValue(format!("time scale {scale}")));
                }
                self.time_scale = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
            }
            OperatorCommand::Restart => {
                let doc = self.initial.clone();
                self.load_document(doc);
                tracing::info!("Scenario restarted");
            }

            OperatorCommand::CreateAsset { asset } => {
                self.create_asset(asset)?;
            }
            OperatorCommand::DeleteAsset { asset_id } => {
                let entity = self.assets.entity(asset_id)?;
                self.reject_ownship(entity, "delete")?;
                self.assets.remove(asset_id);
                let _ = self.world.despawn(entity);
                tracing::info!(asset = %asset_id, "Asset deleted");
            }
            OperatorCommand::MoveAsset { asset_id, position } => {
                let point = position.resolve()?;
                let entity = self.assets.entity(asset_id)?;
                let (kin, commanded, route) = self
                    .world
                    .query_one_mut::<(&mut Kinematics, &mut Commanded, &WaypointQueue)>(entity)
                    .map_err(|_| CommandError::AssetNotFound(asset_id))?;
                kin.position = point;
                if !route.points.is_empty() {
                    systems::navigation::steer_to_head(kin, commanded, route);
                }
            }
            OperatorCommand::RenameAsset { asset_id, name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(CommandError::InvalidValue("empty asset name".into()));
                }
                self.asset_info_mut(asset_id)?.name = name.to_string();
            }
            OperatorCommand::SetCategory { asset_id, category } => {
                let entity = self.assets.entity(asset_id)?;
                self.reject_ownship(entity, "retype")?;
                if category == Category::Ownship {
                    return Err(CommandError::OwnshipProtected("retype"));
                }
                self.asset_info_mut(asset_id)?.category = category;
            }
            OperatorCommand::SetTarget {
                asset_id,
                field,
                value,
            } => {
                self.set_target(asset_id, field, value)?;
            }
            OperatorCommand::SetTransponder {
                asset_id,
                transponder,
            } => {
                let entity = self.assets.entity(asset_id)?;
                let mut current = self
                    .world
                    .get::<&mut Transponder>(entity)
                    .map_err(|_| CommandError::AssetNotFound(asset_id))?;
                *current = transponder;
            }
            OperatorCommand::SetAssetDatalink { asset_id, datalink } => {
                if let Some(code) = datalink.unit_code.as_deref() {
                    if !systems::datalink::valid_unit_code(code) {
                        return Err(CommandError::InvalidValue(format!(
                            "unit code '{code}' is not five digits"
                        )));
                    }
                }
                let entity = self.assets.entity(asset_id)?;
                let mut current = self
                    .world
                    .get::<&mut DatalinkState>(entity)
                    .map_err(|_| CommandError::AssetNotFound(asset_id))?;
                *current = DatalinkState {
                    active: current.active,
                    ..datalink
                };
            }
            OperatorCommand::SetEmitter {
                asset_id,
                emitter,
                active,
            } => {
                let entity = self.assets.entity(asset_id)?;
                let mut emitters = self
                    .world
                    .get::<&mut Emitters>(entity)
                    .map_err(|_| CommandError::AssetNotFound(asset_id))?;
                let state = emitters
                    .states
                    .get_mut(&emitter)
                    .ok_or_else(|| CommandError::NotFound(format!("emitter '{emitter}'")))?;
                *state = active;
            }

            OperatorCommand::AddWaypoint {
                asset_id,
                index,
                position,
            } => {
                let point = position.resolve()?;
                let entity = self.assets.entity(asset_id)?;
                systems::navigation::add_waypoint(&mut self.world, entity, index, point)?;
            }
            OperatorCommand::DeleteWaypoint { asset_id, index } => {
                let entity = self.assets.entity(asset_id)?;
                systems::navigation::delete_waypoint(&mut self.world, entity, index)?;
            }
            OperatorCommand::MoveWaypoint {
                asset_id,
                index,
                position,
            } => {
                let point = position.resolve()?;
                let entity = self.assets.entity(asset_id)?;
                systems::navigation::move_waypoint(&mut self.world, entity, index, point)?;
            }
            OperatorCommand::ClearWaypoints { asset_id } => {
                let entity = self.assets.entity(asset_id)?;
                systems::navigation::clear_waypoints(&mut self.world, entity)?;
            }

            OperatorCommand::Fire {
                firer,
                target,
                category,
            } => {
                let order = FireOrder {
                    firer,
                    target,
                    category,
                };
                match systems::fire_control::fire(
                    &mut self.world,
                    &self.assets,
                    &self.platforms,
                    &self.weapons,
                    order,
                    &mut self.next_weapon_id,
                    self.time.elapsed_secs,
                ) {
                    Ok(munition) => self.events.push(SimEvent::WeaponLaunched {
                        weapon: munition.id,
                        firer,
                        target,
                        variant: munition.variant,
                    }),
                    Err(err) => {
                        self.events.push(SimEvent::FireRejected {
                            firer,
                            target,
                            category,
                            reason: err.to_string(),
                        });
                        return Err(err);
                    }
                }
            }
            OperatorCommand::DeployBuoy { position } => {
                let point = match position {
                    Some(input) => input.resolve()?,
                    None => self.ownship_position()?,
                };
                let buoy =
                    sensors::acoustic::deploy(&mut self.sensors, point, self.time.elapsed_secs);
                self.events.push(SimEvent::BuoyDeployed { buoy });
            }
            OperatorCommand::ToggleSystem { system } => {
                let on = self.systems.toggle(system);
                tracing::info!(system = ?system, on, "System toggled");
            }
            OperatorCommand::SetSensorParameter { parameter } => {
                self.set_sensor_parameter(parameter)?;
            }
            OperatorCommand::SetEsmVisibility { serial, visible } => {
                if !sensors::esm::set_visibility(&mut self.sensors, serial, visible) {
                    return Err(CommandError::NotFound(format!("ESM contact {serial}")));
                }
            }
            OperatorCommand::ReportTrack { asset_id } => {
                let issued = systems::datalink::report_track(
                    &mut self.world,
                    &self.assets,
                    self.systems.datalink,
                    &mut self.datalink,
                    asset_id,
                )?;
                if let Some(track_number) = issued {
                    self.events.push(SimEvent::TrackReported {
                        asset: asset_id,
                        track_number,
                    });
                }
            }

            OperatorCommand::SetBullseye { position, name } => {
                let point = position.resolve()?;
                self.annotations.set_bullseye(point, name);
            }
            OperatorCommand::CreateGeoPoint { name, position } => {
                let point = position.resolve()?;
                self.annotations.create_geo_point(name, point);
            }
            OperatorCommand::DeleteGeoPoint { id } => {
                self.annotations.delete_geo_point(id)?;
            }
            OperatorCommand::MoveGeoPoint { id, position } => {
                let point = position.resolve()?;
                self.annotations.move_geo_point(id, point)?;
            }
            OperatorCommand::CreateShape { name, geometry } => {
                self.annotations.create_shape(name, geometry)?;
            }
            OperatorCommand::DeleteShape { id } => {
                self.annotations.delete_shape(id)?;
            }
            OperatorCommand::MoveShape { id, position } => {
                let point = position.resolve()?;
                self.annotations.move_shape(id, point)?;
            }
            OperatorCommand::CreateBearingLine { bearing } => {
                let origin = self.ownship_position()?;
                self.annotations
                    .create_bearing_line(origin, bearing, self.time.tick)?;
            }
            OperatorCommand::DeleteBearingLine { serial } => {
                self.annotations.delete_bearing_line(serial)?;
            }
            OperatorCommand::MoveBearingLine { serial, position } => {
                let point = position.resolve()?;
                self.annotations.move_bearing_line(serial, point)?;
            }

            OperatorCommand::SaveScenario { path } => {
                self.to_document().save_to_file(Path::new(&path))?;
                tracing::info!(path = %path, "Scenario saved");
            }
            OperatorCommand::LoadScenario { path } => {
                let doc = ScenarioDocument::load_from_file(Path::new(&path))?;
                self.initial = doc.clone();
                self.load_document(doc);
            }
        }
        Ok(())
    }

    fn create_asset(&mut self, asset: NewAsset) -> Result<AssetId, CommandError> {
        if asset.category == Category::Ownship {
            return Err(CommandError::OwnshipProtected("create"));
        }
        let name = asset.name.trim().to_string();
        if name.is_empty() {
            return Err(CommandError::InvalidValue("empty asset name".into()));
        }
        let position = asset.position.resolve()?;
        for (label, value) in [
            ("heading", asset.heading),
            ("speed", asset.speed),
            ("altitude", asset.altitude),
            ("depth", asset.depth),
        ] {
            if !value.is_finite() {
                return Err(CommandError::InvalidValue(format!("{label} {value}")));
            }
        }

        let profile = asset.platform.as_deref().and_then(|p| self.platforms.get(p));
        if let (Some(platform), None) = (asset.platform.as_deref(), profile) {
            tracing::warn!(platform, "Unknown platform; using domain defaults");
        }
        let max_speed = PerformanceLimits::for_asset(asset.domain, profile)
            .max_speed_kn
            .unwrap_or(f64::INFINITY);

        let id = self.assets.allocate();
        let record = AssetRecord {
            id,
            name,
            category: asset.category,
            domain: asset.domain,
            platform: asset.platform.clone(),
            position,
            heading: asset.heading,
            speed: asset.speed.clamp(0.0, max_speed),
            altitude: asset.altitude,
            depth: asset.depth,
            commanded: Commanded::default(),
            waypoints: Vec::new(),
            track_number: None,
            transponder: asset.transponder,
            datalink: DatalinkState::default(),
            emitters: world_setup::default_emitters(&self.platforms, asset.platform.as_deref()),
        };
        world_setup::spawn_asset(&mut self.world, &mut self.assets, &record, None);
        tracing::info!(asset = %id, name = %record.name, domain = ?record.domain, "Asset created");
        Ok(id)
    }

    /// Set one commanded value, clamped to the asset's limits.
    fn set_target(&mut self, asset_id: AssetId, field: TargetField, value: f64) -> Result<(), CommandError> {
        if !value.is_finite() {
            return Err(CommandError::InvalidValue(format!("{field:?} {value}")));
        }
        let entity = self.assets.entity(asset_id)?;
        let is_ownship = self.world.get::<&OwnShip>(entity).is_ok();
        let platforms = Arc::clone(&self.platforms);
        let (info, commanded) = self
            .world
            .query_one_mut::<(&AssetInfo, &mut Commanded)>(entity)
            .map_err(|_| CommandError::AssetNotFound(asset_id))?;
        let limits = PerformanceLimits::for_asset(
            info.domain,
            info.platform.as_deref().and_then(|p| platforms.get(p)),
        );

        match field {
            TargetField::Heading => {
                commanded.heading = Some(normalize_heading(value));
            }
            TargetField::Speed => {
                let mut speed = value.max(0.0);
                if let Some(max) = limits.max_speed_kn {
                    speed = speed.min(max);
                }
                if is_ownship {
                    speed = speed.min(OWNSHIP_MAX_SPEED_KN);
                }
                commanded.speed = Some(speed);
            }
            TargetField::Altitude => {
                if !info.domain.has_altitude() {
                    return Err(CommandError::FieldNotApplicable {
                        field,
                        domain: info.domain,
                    });
                }
                let mut altitude = value.max(0.0);
                if let Some(max) = limits.max_altitude_ft {
                    altitude = altitude.min(max);
                }
                if is_ownship {
                    altitude = altitude.min(OWNSHIP_MAX_ALTITUDE_FT);
                }
                commanded.altitude = Some(altitude);
            }
            TargetField::Depth => {
                if !info.domain.has_depth() {
                    return Err(CommandError::FieldNotApplicable {
                        field,
                        domain: info.domain,
                    });
                }
                commanded.depth = Some(value.max(0.0));
            }
        }
        Ok(())
    }

    fn set_sensor_parameter(&mut self, parameter: SensorParameter) -> Result<(), CommandError> {
        match parameter {
            SensorParameter::ReturnDecaySecs(secs) => {
                if !secs.is_finite() || secs <= 0.0 {
                    return Err(CommandError::InvalidValue(format!("return decay {secs} s")));
                }
                self.sensors.return_decay_secs = secs;
            }
            SensorParameter::DatalinkNetwork(network) => {
                self.datalink.network_id = network.filter(|n| !n.trim().is_empty());
            }
            SensorParameter::TrackBlock { start, end } => {
                systems::datalink::set_track_block(&mut self.datalink, start, end)?;
            }
        }
        tracing::debug!(datalink = ?self.datalink, decay = self.sensors.return_decay_secs, "Sensor parameters updated");
        Ok(())
    }

    fn reject_ownship(&self, entity: hecs::Entity, operation: &'static str) -> Result<(), CommandError> {
        if self.world.get::<&OwnShip>(entity).is_ok() {
            return Err(CommandError::OwnshipProtected(operation));
        }
        Ok(())
    }

    fn asset_info_mut(&mut self, asset_id: AssetId) -> Result<hecs::RefMut<'_, AssetInfo>, CommandError> {
        let entity = self.assets.entity(asset_id)?;
        self.world
            .get::<&mut AssetInfo>(entity)
            .map_err(|_| CommandError::AssetNotFound(asset_id))
    }

    fn ownship_position(&self) -> Result<GeoPoint, CommandError> {
        world_setup::ownship_state(&self.world)
            .map(|(_, kin, _)| kin.position)
            .ok_or_else(|| CommandError::NotFound("ownship".into()))
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        // 1. Asset kinematics
        systems::kinematics::run(&mut self.world, &self.platforms, dt);
        // 2. Waypoint arrival (judged on updated positions)
        systems::navigation::run(&mut self.world, &mut self.events);
        // 3. Munition guidance toward post-kinematics target positions
        systems::missile_kinematics::run(&mut self.world, &self.weapons, dt);
        // 4. Impact resolution (may remove assets)
        systems::intercept::run(
            &mut self.world,
            &mut self.assets,
            &mut self.events,
            &mut self.alerts,
            &mut self.despawn_buffer,
            self.time.tick,
        );
        // 5. Sensors: sweep, radar, IFF, ESM, acoustic, purge
        sensors::run(
            &self.world,
            &self.platforms,
            &mut self.sensors,
            &self.systems,
            &self.time,
            &mut self.events,
        );
        // 6. Datalink identity reconciliation
        systems::datalink::run(&mut self.world, self.systems.datalink, &self.datalink);
    }
}
