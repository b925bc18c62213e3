//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the race session, processes player commands,
//! runs all systems in their fixed order, and produces `RaceSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use gridrush_core::commands::PlayerCommand;
use gridrush_core::config::RaceConfig;
use gridrush_core::enums::CountdownState;
use gridrush_core::error::{ConfigError, SimError};
use gridrush_core::events::RaceEvent;
use gridrush_core::state::{RaceSnapshot, Standings};
use gridrush_core::types::SimTime;

use crate::countdown::Countdown;
use crate::session::RaceSession;
use crate::systems;
use crate::systems::kinematics::InputState;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same race.
    pub seed: u64,
    pub race: RaceConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            race: RaceConfig::default(),
        }
    }
}

/// The simulation engine. Owns the session and all sim state.
pub struct SimulationEngine {
    session: RaceSession,
    time: SimTime,
    countdown: Countdown,
    input: InputState,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<RaceEvent>,
    standings: Standings,
}

impl SimulationEngine {
    /// Validate the config and build a session with its starting grid.
    /// The countdown stays idle until `PlayerCommand::StartRace`.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.race.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let session = RaceSession::new(config.race, &mut rng);

        Ok(Self {
            session,
            time: SimTime::default(),
            countdown: Countdown::new(),
            input: InputState::default(),
            rng,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            standings: Standings::default(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// An error means the tick ordering was violated; the session should be
    /// considered corrupt.
    pub fn tick(&mut self) -> Result<RaceSnapshot, SimError> {
        self.process_commands()?;
        self.run_systems()?;
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.session,
            &self.time,
            self.countdown.state(),
            &self.standings,
            events,
        )
    }

    /// Reset every vehicle, re-form the grid and restart the countdown.
    /// Held accelerate/brake levels survive; pending lane-change edges do not.
    pub fn restart(&mut self) -> Result<(), SimError> {
        self.session.reset(&mut self.rng);
        self.input.clear_edges();
        self.countdown.reset();
        self.events.push(RaceEvent::Restarted);
        self.countdown.start(&mut self.events);
        self.standings = systems::ranking::run(&self.session)?;
        info!(
            competitors = self.session.config.competitor_count,
            "race restarted"
        );
        Ok(())
    }

    pub fn session(&self) -> &RaceSession {
        &self.session
    }

    pub fn config(&self) -> &RaceConfig {
        self.session.config()
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn countdown(&self) -> CountdownState {
        self.countdown.state()
    }

    /// Standings as of the last tick. Empty before the first tick.
    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    /// Current driver input, after the last tick consumed its edges.
    #[cfg(test)]
    pub(crate) fn input(&self) -> InputState {
        self.input
    }

    #[cfg(test)]
    pub(crate) fn session_mut(&mut self) -> &mut RaceSession {
        &mut self.session
    }

    /// Process all queued commands.
    fn process_commands(&mut self) -> Result<(), SimError> {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command)?;
        }
        Ok(())
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), SimError> {
        match command {
            PlayerCommand::SteerLeft => self.input.left = true,
            PlayerCommand::SteerRight => self.input.right = true,
            PlayerCommand::SetAccelerate { held } => self.input.accelerate = held,
            PlayerCommand::SetBrake { held } => self.input.brake = held,
            PlayerCommand::StartRace => {
                if self.countdown.state() == CountdownState::Idle {
                    info!("countdown started");
                    self.countdown.start(&mut self.events);
                }
            }
            PlayerCommand::Restart => self.restart()?,
        }
        Ok(())
    }

    /// Run all systems in order. The order is load-bearing: movement before
    /// bounding refresh, before collisions, before ranking and completion.
    fn run_systems(&mut self) -> Result<(), SimError> {
        let tick = self.time.tick;

        // 1. Countdown (raises the single start transition)
        if self.countdown.advance(&mut self.events) {
            self.session.race_started = true;
            info!(tick, "race started");
        }
        // 2. Kinematics (player, then competitors)
        systems::kinematics::run(&mut self.session, &mut self.input);
        // 3. Bounding volume refresh
        systems::bounding::run(&mut self.session, tick);
        // 4. Collision detection + resolution
        if self.session.is_active() {
            systems::collision::run(&mut self.session, &mut self.rng, tick, &mut self.events)?;
        }
        // 5. Ranking
        self.standings = systems::ranking::run(&self.session)?;
        // 6. Completion
        systems::completion::run(&mut self.session, &mut self.events)?;

        Ok(())
    }
}
