//! Bounding volume refresh.
//!
//! Recomputes every vehicle's collision box from its transform and stamps
//! it with the current tick, so the resolver can reject stale volumes.

use hecs::{Entity, World};

use gridrush_core::components::{BoundingVolume, Transform};
use gridrush_core::config::RaceConfig;

use crate::session::RaceSession;
use crate::world_setup::footprint;

/// Refresh all bounding volumes for `tick`.
pub fn run(session: &mut RaceSession, tick: u64) {
    let config = &session.config;
    for (_entity, (transform, volume)) in session
        .world
        .query_mut::<(&Transform, &mut BoundingVolume)>()
    {
        volume.aabb = footprint(config, transform.position);
        volume.refreshed_tick = Some(tick);
    }
}

/// Refresh a single vehicle's bounding volume. Returns false if the entity
/// lacks a transform or volume.
pub fn refresh_one(world: &mut World, entity: Entity, config: &RaceConfig, tick: u64) -> bool {
    match world.query_one_mut::<(&Transform, &mut BoundingVolume)>(entity) {
        Ok((transform, volume)) => {
            volume.aabb = footprint(config, transform.position);
            volume.refreshed_tick = Some(tick);
            true
        }
        Err(_) => false,
    }
}
