//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Together the components
//! of one entity form the vehicle record.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::Aabb;

/// Marks the single player-controlled vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player;

/// Marks an autonomous competitor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Competitor {
    /// 0-based competitor index, used for the winner message.
    pub index: u32,
}

/// World transform of a vehicle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Transform {
    /// World position. Forward is -z.
    pub position: Vec3,
    /// Visual tilt around the z axis (radians). Cosmetic only.
    pub rotation_z: f32,
}

/// Current lane assignment.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LanePosition {
    pub lane: u32,
}

/// Longitudinal drive state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Drive {
    /// Current forward speed (world units per tick), in `[0, max_speed]`.
    pub speed: f32,
    pub max_speed: f32,
}

/// Race progress.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Progress {
    pub distance_traveled: f32,
}

/// Starting grid cell, assigned at spawn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GridSlot {
    pub row: u32,
    pub col: u32,
}

/// Collision volume derived from the transform each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BoundingVolume {
    pub aabb: Aabb,
    /// Tick at which `aabb` was last recomputed. `None` until the first refresh.
    pub refreshed_tick: Option<u64>,
}
