//! Simulation engine for GRIDRUSH.
//!
//! Owns the race session (a hecs ECS world plus the roster), runs systems
//! once per frame in a fixed order, and produces `RaceSnapshot`s for the
//! rendering and display layers.

pub mod countdown;
pub mod engine;
pub mod grid;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use gridrush_core as core;
pub use session::RaceSession;
