//! ECS systems that operate on the race session each tick.
//!
//! Systems are free functions over the session. They do not own state; all
//! per-race state lives in components or on the session itself. The engine
//! calls them in a fixed order: kinematics, bounding, collision, ranking,
//! completion, snapshot.

pub mod bounding;
pub mod collision;
pub mod completion;
pub mod kinematics;
pub mod ranking;
pub mod snapshot;
