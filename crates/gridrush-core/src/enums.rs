//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Start sequence state, driven by elapsed simulation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "remaining")]
pub enum CountdownState {
    /// Grid is formed, countdown not yet requested.
    #[default]
    Idle,
    /// Showing the given number (3, 2, 1).
    Counting(u8),
    /// Race has started, "GO!" banner still visible.
    Go,
    /// Race is running, banner dismissed.
    Racing,
}

impl CountdownState {
    /// Whether the race start transition has happened.
    pub fn has_started(self) -> bool {
        matches!(self, CountdownState::Go | CountdownState::Racing)
    }
}

/// How a collision was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Longitudinal hit: the trailing car ran into the leader.
    RearEnd,
    /// Lateral contact between side-by-side cars.
    SideSwipe,
}
