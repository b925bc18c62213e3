//! Ranking system: orders racers by distance traveled.
//!
//! Read-only. Ties keep roster order (player first), because the sort is stable.

use gridrush_core::components::Progress;
use gridrush_core::error::SimError;
use gridrush_core::state::{StandingEntry, Standings};
use gridrush_core::types::VehicleId;

use crate::session::RaceSession;

/// Compute the current standings.
pub fn run(session: &RaceSession) -> Result<Standings, SimError> {
    let mut racers = session
        .roster
        .iter()
        .map(|entry| {
            session
                .world
                .get::<&Progress>(entry.entity)
                .map(|progress| (entry.id, progress.distance_traveled))
                .map_err(|_| SimError::MissingVehicle { vehicle: entry.id })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Descending by distance; `sort_by` is stable.
    racers.sort_by(|a, b| b.1.total_cmp(&a.1));

    let entries: Vec<StandingEntry> = racers
        .iter()
        .enumerate()
        .map(|(i, &(vehicle, distance))| StandingEntry {
            vehicle,
            rank: i as u32 + 1,
            distance,
            is_player: vehicle.is_player(),
        })
        .collect();

    let player_rank = entries
        .iter()
        .find(|entry| entry.is_player)
        .map(|entry| entry.rank)
        .ok_or(SimError::MissingVehicle {
            vehicle: VehicleId::PLAYER,
        })?;

    Ok(Standings {
        total: entries.len() as u32,
        player_rank,
        entries,
    })
}
