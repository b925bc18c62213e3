//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Driving ---
    /// Move one lane left. Edge-triggered: one command, one lane.
    SteerLeft,
    /// Move one lane right. Edge-triggered: one command, one lane.
    SteerRight,
    /// Press or release the accelerator.
    SetAccelerate { held: bool },
    /// Press or release the brake.
    SetBrake { held: bool },

    // --- Race control ---
    /// Begin the start countdown. Ignored unless the countdown is idle.
    StartRace,
    /// Reset every vehicle, re-form the grid and restart the countdown.
    Restart,
}
