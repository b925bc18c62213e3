//! Entity spawn factories for setting up the race world.
//!
//! Creates the player car and the competitor cars with the component
//! bundles that make up a vehicle record.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use tracing::debug;

use gridrush_core::components::*;
use gridrush_core::config::RaceConfig;
use gridrush_core::types::{Aabb, VehicleId};

use crate::grid::{self, GridPlacement};
use crate::session::RosterEntry;

/// Populate an empty world: player first, then a freshly formed grid.
/// Returns the roster in scan order.
pub fn setup_race<R: Rng + ?Sized>(
    world: &mut World,
    config: &RaceConfig,
    rng: &mut R,
) -> Vec<RosterEntry> {
    let mut roster = Vec::with_capacity(config.racer_count());
    roster.push(RosterEntry {
        id: VehicleId::PLAYER,
        entity: spawn_player(world, config),
    });

    for placement in grid::form_grid(config, rng) {
        debug!(
            competitor = placement.index,
            row = placement.row,
            lane = placement.lane,
            "grid slot assigned"
        );
        roster.push(RosterEntry {
            id: VehicleId::competitor(placement.index),
            entity: spawn_competitor(world, config, rng, &placement),
        });
    }

    roster
}

/// Spawn the player's car in its fixed starting slot.
pub fn spawn_player(world: &mut World, config: &RaceConfig) -> hecs::Entity {
    let lane = config.player_start_lane;
    let position = Vec3::new(config.lane_center_x(lane), 0.0, grid::player_start_z(config));

    world.spawn((
        Player,
        LanePosition { lane },
        Transform {
            position,
            rotation_z: 0.0,
        },
        Drive {
            speed: 0.0,
            max_speed: config.player_max_speed(),
        },
        Progress::default(),
        GridSlot { row: 0, col: lane },
        BoundingVolume {
            aabb: footprint(config, position),
            refreshed_tick: None,
        },
    ))
}

/// Spawn one competitor at its grid placement with a random top speed.
pub fn spawn_competitor<R: Rng + ?Sized>(
    world: &mut World,
    config: &RaceConfig,
    rng: &mut R,
    placement: &GridPlacement,
) -> hecs::Entity {
    let position = Vec3::new(placement.x, 0.0, placement.z);
    let max_speed = rng.gen_range(config.speed_min..=config.speed_max);

    world.spawn((
        Competitor {
            index: placement.index,
        },
        LanePosition {
            lane: placement.lane,
        },
        Transform {
            position,
            rotation_z: 0.0,
        },
        Drive {
            speed: 0.0,
            max_speed,
        },
        Progress::default(),
        GridSlot {
            row: placement.row,
            col: placement.lane,
        },
        BoundingVolume {
            aabb: footprint(config, position),
            refreshed_tick: None,
        },
    ))
}

/// Collision footprint of a car at `position`.
pub fn footprint(config: &RaceConfig, position: Vec3) -> Aabb {
    Aabb::from_footprint(
        position,
        config.car_width,
        config.car_length,
        config.collision_shrink_margin,
    )
}
