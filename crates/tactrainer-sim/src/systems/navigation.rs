//! Waypoint navigator and route editing.
//!
//! Runs after kinematics so arrival is judged on the updated position. Every
//! edit that changes the head of a route re-aims the commanded heading.

use hecs::{Entity, World};

use tactrainer_core::components::{AssetId, Commanded, Kinematics, WaypointQueue};
use tactrainer_core::constants::WAYPOINT_ARRIVAL_NM;
use tactrainer_core::error::CommandError;
use tactrainer_core::events::SimEvent;
use tactrainer_core::types::GeoPoint;

/// Pop reached waypoints (at most one per asset per tick) and steer for the next.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    for (_entity, (id, kin, commanded, route)) in world.query_mut::<(
        &AssetId,
        &Kinematics,
        &mut Commanded,
        &mut WaypointQueue,
    )>() {
        let Some(next) = route.points.front() else {
            continue;
        };
        if kin.position.distance_to(next) >= WAYPOINT_ARRIVAL_NM {
            continue;
        }
        route.points.pop_front();
        steer_to_head(kin, commanded, route);
        events.push(SimEvent::WaypointReached {
            asset: *id,
            remaining: route.points.len(),
        });
    }
}

/// Aim the commanded heading at the first waypoint, or clear it if there is none.
pub fn steer_to_head(kin: &Kinematics, commanded: &mut Commanded, route: &WaypointQueue) {
    commanded.heading = route.points.front().map(|p| kin.position.bearing_to(p));
}

/// Insert a waypoint at `index`, appending when it is absent or past the end.
pub fn add_waypoint(
    world: &mut World,
    entity: Entity,
    index: Option<usize>,
    point: GeoPoint,
) -> Result<(), CommandError> {
    edit_route(world, entity, |route| {
        let at = index.unwrap_or(route.points.len()).min(route.points.len());
        route.points.insert(at, point);
        Ok(at == 0)
    })
}

pub fn delete_waypoint(world: &mut World, entity: Entity, index: usize) -> Result<(), CommandError> {
    edit_route(world, entity, |route| {
        let len = route.points.len();
        route
            .points
            .remove(index)
            .ok_or(CommandError::WaypointIndex { index, len })?;
        Ok(index == 0)
    })
}

pub fn move_waypoint(
    world: &mut World,
    entity: Entity,
    index: usize,
    point: GeoPoint,
) -> Result<(), CommandError> {
    edit_route(world, entity, |route| {
        let len = route.points.len();
        let slot = route
            .points
            .get_mut(index)
            .ok_or(CommandError::WaypointIndex { index, len })?;
        *slot = point;
        Ok(index == 0)
    })
}

pub fn clear_waypoints(world: &mut World, entity: Entity) -> Result<(), CommandError> {
    edit_route(world, entity, |route| {
        let had_route = !route.points.is_empty();
        route.points.clear();
        Ok(had_route)
    })
}

/// Apply `edit` to the route; when it reports the head changed, re-aim.
fn edit_route(
    world: &mut World,
    entity: Entity,
    edit: impl FnOnce(&mut WaypointQueue) -> Result<bool, CommandError>,
) -> Result<(), CommandError> {
    let (id, kin, commanded, route) = world
        .query_one_mut::<(&AssetId, &Kinematics, &mut Commanded, &mut WaypointQueue)>(entity)
        .map_err(|_| CommandError::NotFound(format!("route of entity {entity:?}")))?;
    if edit(&mut *route)? {
        steer_to_head(kin, commanded, route);
        tracing::debug!(asset = %id, remaining = route.points.len(), "Route head changed");
    }
    Ok(())
}
