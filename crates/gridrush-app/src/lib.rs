//! GRIDRUSH headless host.
//!
//! Runs the simulation on a dedicated game-loop thread, feeds it player
//! commands (from the autopilot or any other sender), and renders standings
//! as text.

pub mod autopilot;
pub mod display;
pub mod game_loop;
pub mod state;

pub use gridrush_core as core;
