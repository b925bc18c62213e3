//! Error types for configuration and simulation.

use thiserror::Error;

use crate::types::VehicleId;

/// Construction-time configuration failure. Not recoverable mid-race.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The track needs at least one lane.
    #[error("lane_count must be at least 1")]
    NoLanes,
    /// A dimension or rate that must be strictly positive was not.
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    /// Competitor speed range is empty or negative.
    #[error("invalid competitor speed range [{min}, {max}]")]
    InvalidSpeedRange { min: f32, max: f32 },
    /// Competitors were requested but there are no grid rows to seat them.
    #[error("grid_rows must be at least 1 when competitors are present")]
    NoGridRows,
    /// The player's starting lane does not exist on this track.
    #[error("player_start_lane {lane} is outside [0, {lane_count})")]
    PlayerLaneOutOfRange { lane: u32, lane_count: u32 },
    /// Shrink margin would collapse or invert the collision box.
    #[error("collision_shrink_margin {margin} is invalid for a {width}x{length} car")]
    InvalidShrinkMargin { margin: f32, width: f32, length: f32 },
    /// Config document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tick-ordering invariant violation. Indicates a bug, never user input.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    /// A collision pair referenced a bounding volume not refreshed this tick.
    #[error("bounding volume of {vehicle} is stale (refreshed at {refreshed:?}, tick {tick})")]
    StaleBoundingVolume {
        vehicle: VehicleId,
        refreshed: Option<u64>,
        tick: u64,
    },
    /// A roster entry no longer resolves to a live vehicle.
    #[error("{vehicle} is missing from the world")]
    MissingVehicle { vehicle: VehicleId },
}
