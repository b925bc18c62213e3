//! Fundamental geometric and simulation types.

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Stable identifier for a vehicle within a session.
/// The player is always `VehicleId::PLAYER`; competitors are numbered from 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleId(pub u32);

impl VehicleId {
    pub const PLAYER: VehicleId = VehicleId(0);

    /// Id of the competitor with the given 0-based index.
    pub fn competitor(index: u32) -> Self {
        VehicleId(index + 1)
    }

    pub fn is_player(self) -> bool {
        self == Self::PLAYER
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            write!(f, "player")
        } else {
            write!(f, "competitor#{}", self.0)
        }
    }
}

/// Axis-aligned bounding box on the ground plane.
/// `x` is the lateral axis, `y` of each corner holds the world z coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box for a car footprint centred on `position`, shrunk by `margin` on every side.
    pub fn from_footprint(position: Vec3, width: f32, length: f32, margin: f32) -> Self {
        let half = Vec2::new(width * 0.5 - margin, length * 0.5 - margin).max(Vec2::ZERO);
        let center = Vec2::new(position.x, position.z);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap on both axes. Boxes that only touch do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_z(other)
    }

    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }

    pub fn overlaps_z(&self, other: &Aabb) -> bool {
        self.min.y < other.max.y && self.max.y > other.min.y
    }

    /// Penetration depth on the lateral axis.
    pub fn x_overlap(&self, other: &Aabb) -> f32 {
        (self.max.x - other.min.x)
            .abs()
            .min((other.max.x - self.min.x).abs())
    }

    /// Penetration depth on the longitudinal axis.
    pub fn z_overlap(&self, other: &Aabb) -> f32 {
        (self.max.y - other.min.y)
            .abs()
            .min((other.max.y - self.min.y).abs())
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
