//! Game loop thread — runs the simulation engine at a fixed rate and
//! publishes snapshots.
//!
//! The engine is moved into this thread. Commands arrive via `mpsc`; the
//! autopilot, when enabled, adds its own commands each tick. The latest
//! snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use gridrush_core::constants::TICK_RATE;
use gridrush_core::error::SimError;
use gridrush_core::events::RaceEvent;
use gridrush_core::state::RaceSnapshot;
use gridrush_sim::engine::SimulationEngine;

use crate::autopilot::Autopilot;
use crate::display;
use crate::state::GameLoopCommand;

/// How the loop paces and ends itself.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub tick_rate_hz: u32,
    /// Sleep between ticks. Off runs as fast as possible.
    pub realtime: bool,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Stop on the tick the race finishes.
    pub stop_on_finish: bool,
    pub autopilot: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            tick_rate_hz: TICK_RATE,
            realtime: false,
            max_ticks: None,
            stop_on_finish: true,
            autopilot: true,
        }
    }
}

impl LoopSettings {
    /// Nominal duration of one tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate_hz.max(1)))
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Finished,
    TickLimit,
    Shutdown,
}

/// Summary returned when the loop thread exits cleanly.
#[derive(Debug, Clone)]
pub struct LoopSummary {
    pub ticks: u64,
    pub reason: StopReason,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle to join on.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<RaceSnapshot>>>,
) -> io::Result<(
    mpsc::Sender<GameLoopCommand>,
    JoinHandle<Result<LoopSummary, SimError>>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("gridrush-game-loop".into())
        .spawn(move || run_game_loop(engine, &settings, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until a stop condition, a Shutdown command, channel
/// disconnect, or a simulation error.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    settings: &LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<RaceSnapshot>>,
) -> Result<LoopSummary, SimError> {
    let tick_duration = settings.tick_duration();
    let mut autopilot = settings
        .autopilot
        .then(|| Autopilot::new(engine.config().lane_count));
    let mut last_snapshot: Option<RaceSnapshot> = None;
    let mut ticks = 0u64;
    let mut next_tick_time = Instant::now();

    let reason = loop {
        if settings.max_ticks.is_some_and(|max| ticks >= max) {
            break StopReason::TickLimit;
        }

        // 1. Drain all pending commands
        let mut shutdown = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    shutdown = true;
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        if shutdown {
            break StopReason::Shutdown;
        }

        // 2. Autopilot input
        if let Some(pilot) = autopilot.as_mut() {
            engine.queue_commands(pilot.commands(last_snapshot.as_ref()));
        }

        // 3. Advance one tick
        let snapshot = match engine.tick() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(%err, tick = engine.time().tick, "simulation tick failed");
                return Err(err);
            }
        };
        ticks += 1;
        log_tick(&snapshot, settings.tick_rate_hz);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        let finished = snapshot.race_finished;
        last_snapshot = Some(snapshot);

        if finished && settings.stop_on_finish {
            break StopReason::Finished;
        }

        // 5. Sleep until next tick
        if settings.realtime {
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick_duration * 2 {
                // Too far behind, skip ahead instead of catching up
                next_tick_time = now;
            }
        }
    };

    info!(ticks, ?reason, "game loop stopped");
    Ok(LoopSummary { ticks, reason })
}

fn log_tick(snapshot: &RaceSnapshot, tick_rate_hz: u32) {
    for event in &snapshot.events {
        match event {
            RaceEvent::CountdownTick { remaining } => info!(remaining, "countdown"),
            RaceEvent::Go => info!("GO"),
            RaceEvent::Collision { a, b, kind, .. } => {
                debug!(%a, %b, ?kind, "collision")
            }
            RaceEvent::Finished { message, .. } => info!(%message, "finish"),
            RaceEvent::Restarted => info!("restarted"),
        }
    }

    if snapshot.time.tick % u64::from(tick_rate_hz.max(1)) == 0 {
        info!("{}", display::status_line(snapshot));
    }
}
