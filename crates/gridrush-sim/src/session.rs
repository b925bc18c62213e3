//! Race session: the single owner of all per-race state.
//!
//! Every system receives the session explicitly. It is built when the
//! engine starts and reset in place on restart.

use hecs::{Entity, World};
use rand::Rng;

use gridrush_core::config::RaceConfig;
use gridrush_core::error::SimError;
use gridrush_core::types::VehicleId;

use crate::world_setup;

/// Lookup key pairing a stable vehicle id with its ECS entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: VehicleId,
    pub entity: Entity,
}

pub struct RaceSession {
    pub(crate) config: RaceConfig,
    pub(crate) world: World,
    /// Player first, then competitors in index order. This is the scan order
    /// for collisions, ranking ties and finish priority.
    pub(crate) roster: Vec<RosterEntry>,
    pub(crate) race_started: bool,
    pub(crate) race_finished: bool,
    pub(crate) winner: Option<VehicleId>,
    pub(crate) winner_message: Option<String>,
}

impl RaceSession {
    /// Build a session with a freshly formed grid. `config` must be validated.
    pub fn new<R: Rng + ?Sized>(config: RaceConfig, rng: &mut R) -> Self {
        let mut world = World::new();
        let roster = world_setup::setup_race(&mut world, &config, rng);
        Self {
            config,
            world,
            roster,
            race_started: false,
            race_finished: false,
            winner: None,
            winner_message: None,
        }
    }

    /// Drop every vehicle, re-form the grid and clear race flags.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.world.clear();
        self.roster = world_setup::setup_race(&mut self.world, &self.config, rng);
        self.race_started = false;
        self.race_finished = false;
        self.winner = None;
        self.winner_message = None;
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Entity for a vehicle id.
    pub fn entity_of(&self, id: VehicleId) -> Result<Entity, SimError> {
        self.roster
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.entity)
            .ok_or(SimError::MissingVehicle { vehicle: id })
    }

    pub fn race_started(&self) -> bool {
        self.race_started
    }

    pub fn race_finished(&self) -> bool {
        self.race_finished
    }

    /// Vehicles move only between the start signal and the finish.
    pub fn is_active(&self) -> bool {
        self.race_started && !self.race_finished
    }

    pub fn winner(&self) -> Option<VehicleId> {
        self.winner
    }

    pub fn winner_message(&self) -> Option<&str> {
        self.winner_message.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
