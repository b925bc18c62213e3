//! Race completion: the first racer past the finish distance wins, once.

use tracing::info;

use gridrush_core::components::{Competitor, Progress};
use gridrush_core::constants::PLAYER_WIN_MESSAGE;
use gridrush_core::error::SimError;
use gridrush_core::events::RaceEvent;
use gridrush_core::types::VehicleId;

use crate::session::RaceSession;

/// Check for a finisher in roster order (player first, so the player wins a
/// same-tick tie). Returns the winner on the tick the race ends.
pub fn run(
    session: &mut RaceSession,
    events: &mut Vec<RaceEvent>,
) -> Result<Option<VehicleId>, SimError> {
    if session.race_finished {
        return Ok(None);
    }

    let race_distance = session.config.race_distance;
    let mut winner = None;
    for entry in &session.roster {
        let progress = session
            .world
            .get::<&Progress>(entry.entity)
            .map_err(|_| SimError::MissingVehicle { vehicle: entry.id })?;
        if progress.distance_traveled >= race_distance {
            winner = Some(*entry);
            break;
        }
    }

    let Some(entry) = winner else {
        return Ok(None);
    };

    let message = if entry.id.is_player() {
        PLAYER_WIN_MESSAGE.to_string()
    } else {
        let competitor = session
            .world
            .get::<&Competitor>(entry.entity)
            .map_err(|_| SimError::MissingVehicle { vehicle: entry.id })?;
        format!("Competitor {} wins!", competitor.index + 1)
    };

    info!(winner = %entry.id, %message, "race finished");
    session.race_finished = true;
    session.winner = Some(entry.id);
    session.winner_message = Some(message.clone());
    events.push(RaceEvent::Finished {
        winner: entry.id,
        message,
    });

    Ok(Some(entry.id))
}
