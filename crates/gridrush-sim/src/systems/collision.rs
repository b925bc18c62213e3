//! Collision detection and response between vehicles.
//!
//! Detection is a pairwise AABB sweep over the roster. Each intersecting
//! pair is resolved along its axis of least penetration:
//!   - Rear-end (z overlap smaller): the trailing car loses more speed and
//!     is pushed back out of the leader, with a small lateral nudge.
//!   - Side-swipe (x overlap smaller or equal): both cars lose the same
//!     speed and are pushed apart sideways.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use tracing::debug;

use gridrush_core::components::{BoundingVolume, Drive, Transform};
use gridrush_core::config::RaceConfig;
use gridrush_core::constants::*;
use gridrush_core::enums::CollisionKind;
use gridrush_core::error::SimError;
use gridrush_core::events::RaceEvent;
use gridrush_core::types::{Aabb, VehicleId};

use crate::session::{RaceSession, RosterEntry};
use crate::systems::bounding;
use crate::world_setup::footprint;

/// Physical state of one side of a collision, copied out of the world.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: VehicleId,
    pub position: Vec3,
    pub speed: f32,
    pub aabb: Aabb,
}

/// Outcome of a resolved collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub kind: CollisionKind,
    pub midpoint: Vec3,
}

/// Detect and resolve all collisions for this tick.
/// Returns the number of pairs that were actually resolved.
pub fn run<R: Rng + ?Sized>(
    session: &mut RaceSession,
    rng: &mut R,
    tick: u64,
    events: &mut Vec<RaceEvent>,
) -> Result<u32, SimError> {
    let pairs = detect(session)?;
    let mut resolved = 0;

    for (first, second) in pairs {
        let mut a = load_body(&session.world, first, tick)?;
        let mut b = load_body(&session.world, second, tick)?;

        let Some(resolution) = resolve_pair(&mut a, &mut b, &session.config, rng) else {
            // An earlier pair this tick already pushed these two apart.
            continue;
        };

        store_body(&mut session.world, first, &a)?;
        store_body(&mut session.world, second, &b)?;
        bounding::refresh_one(&mut session.world, first.entity, &session.config, tick);
        bounding::refresh_one(&mut session.world, second.entity, &session.config, tick);

        debug!(
            a = %a.id,
            b = %b.id,
            kind = ?resolution.kind,
            "collision resolved"
        );
        events.push(RaceEvent::Collision {
            a: a.id,
            b: b.id,
            kind: resolution.kind,
            midpoint: resolution.midpoint,
        });
        resolved += 1;
    }

    Ok(resolved)
}

/// All intersecting unordered pairs, each once, in roster order.
pub fn detect(session: &RaceSession) -> Result<Vec<(RosterEntry, RosterEntry)>, SimError> {
    let volumes = session
        .roster
        .iter()
        .map(|entry| {
            session
                .world
                .get::<&BoundingVolume>(entry.entity)
                .map(|volume| (*entry, volume.aabb))
                .map_err(|_| SimError::MissingVehicle { vehicle: entry.id })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut pairs = Vec::new();
    for (i, (entry_a, aabb_a)) in volumes.iter().enumerate() {
        for (entry_b, aabb_b) in &volumes[i + 1..] {
            if aabb_a.intersects(aabb_b) {
                pairs.push((*entry_a, *entry_b));
            }
        }
    }
    Ok(pairs)
}

/// Separate two overlapping bodies and damp their speeds.
/// Returns `None` when the bodies no longer intersect.
pub fn resolve_pair<R: Rng + ?Sized>(
    a: &mut Body,
    b: &mut Body,
    config: &RaceConfig,
    rng: &mut R,
) -> Option<Resolution> {
    if !a.aabb.intersects(&b.aabb) {
        return None;
    }

    let z_overlap = a.aabb.z_overlap(&b.aabb);
    let x_overlap = a.aabb.x_overlap(&b.aabb);
    let midpoint = (a.position + b.position) * 0.5;

    let kind = if z_overlap < x_overlap {
        // Leading car is further forward (smaller z).
        let (leading, trailing) = if a.position.z <= b.position.z {
            (&mut *a, &mut *b)
        } else {
            (&mut *b, &mut *a)
        };
        trailing.speed *= REAR_END_TRAILING_DAMPING;
        leading.speed *= REAR_END_LEADING_DAMPING;

        let pushout = (config.car_length * REAR_END_PUSHOUT_FACTOR - z_overlap).max(z_overlap);
        trailing.position.z += pushout;
        trailing.position.x += rng.gen_range(-REAR_END_LATERAL_NUDGE..=REAR_END_LATERAL_NUDGE);
        CollisionKind::RearEnd
    } else {
        let (left, right) = if a.position.x <= b.position.x {
            (&mut *a, &mut *b)
        } else {
            (&mut *b, &mut *a)
        };
        left.speed *= SIDE_SWIPE_DAMPING;
        right.speed *= SIDE_SWIPE_DAMPING;

        let separation =
            (config.lane_width() * SIDE_SWIPE_PUSHOUT_FACTOR - x_overlap).max(x_overlap);
        left.position.x -= separation * 0.5;
        right.position.x += separation * 0.5;
        CollisionKind::SideSwipe
    };

    a.aabb = footprint(config, a.position);
    b.aabb = footprint(config, b.position);

    Some(Resolution { kind, midpoint })
}

/// Copy a vehicle's collision state out of the world. The bounding volume
/// must have been refreshed this tick.
fn load_body(world: &World, entry: RosterEntry, tick: u64) -> Result<Body, SimError> {
    let missing = SimError::MissingVehicle { vehicle: entry.id };
    let transform = world.get::<&Transform>(entry.entity).map_err(|_| missing.clone())?;
    let drive = world.get::<&Drive>(entry.entity).map_err(|_| missing.clone())?;
    let volume = world.get::<&BoundingVolume>(entry.entity).map_err(|_| missing)?;

    if volume.refreshed_tick != Some(tick) {
        return Err(SimError::StaleBoundingVolume {
            vehicle: entry.id,
            refreshed: volume.refreshed_tick,
            tick,
        });
    }

    Ok(Body {
        id: entry.id,
        position: transform.position,
        speed: drive.speed,
        aabb: volume.aabb,
    })
}

/// Write a resolved body back. Speed is re-clamped to the car's range.
fn store_body(world: &mut World, entry: RosterEntry, body: &Body) -> Result<(), SimError> {
    let (transform, drive) = world
        .query_one_mut::<(&mut Transform, &mut Drive)>(entry.entity)
        .map_err(|_| SimError::MissingVehicle { vehicle: entry.id })?;
    transform.position = body.position;
    drive.speed = body.speed.clamp(0.0, drive.max_speed);
    Ok(())
}
