//! Race state snapshot: the complete visible state handed to the
//! rendering and display layers after each tick.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::CountdownState;
use crate::events::RaceEvent;
use crate::types::{SimTime, VehicleId};

/// Complete race state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub time: SimTime,
    pub countdown: CountdownState,
    pub race_started: bool,
    pub race_finished: bool,
    pub winner_message: Option<String>,
    /// Vehicles in roster order (player first).
    pub vehicles: Vec<VehicleView>,
    pub standings: Standings,
    pub camera: CameraRig,
    /// World z of the finish line.
    pub finish_line_z: f32,
    pub events: Vec<RaceEvent>,
}

/// Per-vehicle pose and telemetry for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleView {
    pub id: VehicleId,
    pub is_player: bool,
    pub lane: u32,
    pub position: Vec3,
    pub rotation_z: f32,
    pub speed: f32,
    pub distance: f32,
    pub grid_row: u32,
    pub grid_col: u32,
}

/// One racer's standing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub vehicle: VehicleId,
    /// 1-based rank.
    pub rank: u32,
    pub distance: f32,
    pub is_player: bool,
}

/// Standings ordered from leader to last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub entries: Vec<StandingEntry>,
    /// Player's 1-based rank.
    pub player_rank: u32,
    pub total: u32,
}

impl Standings {
    /// Text for the position display, e.g. `Position: 2/4`.
    pub fn display_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position: {}/{}", self.player_rank, self.total)
    }
}

/// Follow camera pose derived from the player position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub look_at: Vec3,
}
