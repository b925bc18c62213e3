//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use gridrush_core::commands::PlayerCommand;
use gridrush_core::state::RaceSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` so the state can be shared by reference
/// - the latest snapshot is `Arc`-shared with the game loop thread
pub struct AppState {
    /// Channel sender to the game loop. `None` until the loop is spawned.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<RaceSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the sender of a freshly spawned game loop.
    /// Fails if a loop is already attached.
    pub fn attach(&self, tx: mpsc::Sender<GameLoopCommand>) -> Result<()> {
        let mut lock = self.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;
        if lock.is_some() {
            return Err(anyhow!("game loop already running"));
        }
        *lock = Some(tx);
        Ok(())
    }

    /// Forward a player command to the game loop.
    pub fn send_command(&self, command: PlayerCommand) -> Result<()> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Ask the game loop to stop and detach it. A loop that already exited
    /// is not an error.
    pub fn shutdown(&self) -> Result<()> {
        let mut lock = self.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;
        if let Some(tx) = lock.take() {
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        Ok(())
    }

    /// Clone of the latest snapshot, if any tick has run.
    pub fn snapshot(&self) -> Result<Option<RaceSnapshot>> {
        let lock = self
            .latest_snapshot
            .lock()
            .map_err(|e| anyhow!(e.to_string()))?;
        Ok(lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<()> {
        let lock = self.command_tx.lock().map_err(|e| anyhow!(e.to_string()))?;
        match lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| anyhow!("failed to send command: {e}")),
            None => Err(anyhow!("game loop not started")),
        }
    }
}
