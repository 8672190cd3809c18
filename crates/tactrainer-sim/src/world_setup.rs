//! Entity spawn factories and the asset id index.
//!
//! Assets are hecs entities carrying a stable `AssetId`; the index maps those
//! ids back to entities so commands and systems can follow references.

use std::collections::{BTreeMap, HashMap, VecDeque};

use hecs::{Entity, World};

use tactrainer_core::catalog::PlatformCatalog;
use tactrainer_core::components::*;
use tactrainer_core::enums::*;
use tactrainer_core::error::CommandError;
use tactrainer_core::types::GeoPoint;

use crate::scenario::AssetRecord;

/// Name given to the ownship created when a world has none.
pub const DEFAULT_OWNSHIP_NAME: &str = "Ownship";

/// Start position of the default ownship.
pub const DEFAULT_OWNSHIP_POSITION: GeoPoint = GeoPoint {
    lat: 26.0,
    lon: 54.0,
};

/// Maps stable asset ids to live entities and hands out new ids.
#[derive(Debug, Default)]
pub struct AssetIndex {
    entities: HashMap<AssetId, Entity>,
    next_id: u32,
}

impl AssetIndex {
    pub fn get(&self, id: AssetId) -> Option<Entity> {
        self.entities.get(&id).copied()
    }

    /// Like `get`, but as a command result.
    pub fn entity(&self, id: AssetId) -> Result<Entity, CommandError> {
        self.get(id).ok_or(CommandError::AssetNotFound(id))
    }

    /// Reserve the next unused id.
    pub fn allocate(&mut self) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an entity under `id`, keeping the allocator ahead of it.
    pub fn insert(&mut self, id: AssetId, entity: Entity) {
        self.entities.insert(id, entity);
        self.next_id = self.next_id.max(id.0 + 1);
    }

    pub fn remove(&mut self, id: AssetId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Forget every entity and restart allocation at `next_id`.
    pub fn reset(&mut self, next_id: u32) {
        self.entities.clear();
        self.next_id = next_id;
    }
}

/// Spawn one asset from its persisted form.
///
/// The ownship also gets the `OwnShip` marker and a magazine.
pub fn spawn_asset(
    world: &mut World,
    index: &mut AssetIndex,
    record: &AssetRecord,
    inventory: Option<WeaponInventory>,
) -> Entity {
    let info = AssetInfo {
        name: record.name.clone(),
        category: record.category,
        domain: record.domain,
        platform: record.platform.clone(),
        track_number: record.track_number,
    };
    let kinematics = Kinematics {
        position: record.position,
        heading: tactrainer_core::geo::normalize_heading(record.heading),
        speed: record.speed.max(0.0),
        altitude: if record.domain.has_altitude() {
            record.altitude.max(0.0)
        } else {
            0.0
        },
        depth: if record.domain.has_depth() {
            record.depth.max(0.0)
        } else {
            0.0
        },
    };

    let entity = world.spawn((
        record.id,
        info,
        kinematics,
        record.commanded,
        WaypointQueue {
            points: record.waypoints.iter().copied().collect::<VecDeque<_>>(),
        },
        record.transponder.clone(),
        record.datalink.clone(),
        Emitters {
            states: record.emitters.clone(),
        },
    ));

    if record.category == Category::Ownship {
        let _ = world.insert(entity, (OwnShip, inventory.unwrap_or_default()));
    }

    index.insert(record.id, entity);
    entity
}

/// Emitter map for a fresh asset: every platform emitter, radiating.
pub fn default_emitters(platforms: &PlatformCatalog, platform: Option<&str>) -> BTreeMap<String, bool> {
    platform
        .and_then(|name| platforms.get(name))
        .map(|profile| profile.emitters.iter().map(|e| (e.clone(), true)).collect())
        .unwrap_or_default()
}

/// Starting magazine for an ownship on `platform`.
pub fn default_inventory(platforms: &PlatformCatalog, platform: Option<&str>) -> WeaponInventory {
    WeaponInventory {
        counts: platform
            .and_then(|name| platforms.get(name))
            .map(|profile| profile.loadout.clone())
            .unwrap_or_default(),
    }
}

/// Record for the ownship used when a world has none.
pub fn default_ownship_record(id: AssetId) -> AssetRecord {
    AssetRecord {
        id,
        name: DEFAULT_OWNSHIP_NAME.to_string(),
        category: Category::Ownship,
        domain: Domain::Air,
        platform: None,
        position: DEFAULT_OWNSHIP_POSITION,
        heading: 0.0,
        speed: 0.0,
        altitude: 0.0,
        depth: 0.0,
        commanded: Commanded::default(),
        waypoints: Vec::new(),
        track_number: None,
        transponder: Transponder::default(),
        datalink: DatalinkState::default(),
        emitters: BTreeMap::new(),
    }
}

/// Find the ownship entity and its id.
pub fn find_ownship(world: &World) -> Option<(Entity, AssetId)> {
    world
        .query::<(&OwnShip, &AssetId)>()
        .iter()
        .next()
        .map(|(entity, (_, id))| (entity, *id))
}

/// Ownship id, position state and domain.
pub fn ownship_state(world: &World) -> Option<(AssetId, Kinematics, Domain)> {
    world
        .query::<(&OwnShip, &AssetId, &Kinematics, &AssetInfo)>()
        .iter()
        .next()
        .map(|(_, (_, id, kin, info))| (*id, *kin, info.domain))
}
