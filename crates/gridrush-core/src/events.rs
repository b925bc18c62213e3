//! Events emitted by the simulation for rendering, audio and UI feedback.
//!
//! Events are transient: each snapshot carries the events raised since the
//! previous one, and they are not part of simulation state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::CollisionKind;
use crate::types::VehicleId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RaceEvent {
    /// A countdown number is now showing.
    CountdownTick { remaining: u8 },
    /// The race has started.
    Go,
    /// Two vehicles collided and were separated.
    Collision {
        a: VehicleId,
        b: VehicleId,
        kind: CollisionKind,
        /// Midpoint between the two cars before separation.
        midpoint: Vec3,
    },
    /// A vehicle crossed the finish distance first.
    Finished { winner: VehicleId, message: String },
    /// The session was reset.
    Restarted,
}
