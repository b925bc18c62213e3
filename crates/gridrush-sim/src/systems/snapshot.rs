//! Snapshot system: reads the session and builds a complete RaceSnapshot.
//!
//! Read-only: it never modifies the world.

use glam::Vec3;

use gridrush_core::components::*;
use gridrush_core::constants::{CAMERA_DISTANCE, CAMERA_HEIGHT, CAMERA_LOOK_AHEAD};
use gridrush_core::enums::CountdownState;
use gridrush_core::error::SimError;
use gridrush_core::events::RaceEvent;
use gridrush_core::state::*;
use gridrush_core::types::SimTime;

use crate::session::RaceSession;

/// Build a complete RaceSnapshot from the current session state.
pub fn build_snapshot(
    session: &RaceSession,
    time: &SimTime,
    countdown: CountdownState,
    standings: &Standings,
    events: Vec<RaceEvent>,
) -> Result<RaceSnapshot, SimError> {
    let vehicles = build_vehicles(session)?;
    let player_position = vehicles
        .iter()
        .find(|view| view.is_player)
        .map(|view| view.position)
        .unwrap_or_default();

    Ok(RaceSnapshot {
        time: *time,
        countdown,
        race_started: session.race_started,
        race_finished: session.race_finished,
        winner_message: session.winner_message.clone(),
        vehicles,
        standings: standings.clone(),
        camera: camera_rig(player_position),
        finish_line_z: -session.config.race_distance,
        events,
    })
}

/// Camera trails the player at a fixed offset and looks down the track.
pub fn camera_rig(player_position: Vec3) -> CameraRig {
    CameraRig {
        position: Vec3::new(
            player_position.x,
            CAMERA_HEIGHT,
            player_position.z + CAMERA_DISTANCE,
        ),
        look_at: Vec3::new(player_position.x, 0.0, player_position.z - CAMERA_LOOK_AHEAD),
    }
}

/// Build VehicleView list in roster order.
fn build_vehicles(session: &RaceSession) -> Result<Vec<VehicleView>, SimError> {
    session
        .roster
        .iter()
        .map(|entry| {
            let missing = || SimError::MissingVehicle { vehicle: entry.id };
            let mut query = session
                .world
                .query_one::<(&LanePosition, &Transform, &Drive, &Progress, &GridSlot)>(
                    entry.entity,
                )
                .map_err(|_| missing())?;
            let (lane, transform, drive, progress, slot) = query.get().ok_or_else(missing)?;

            Ok(VehicleView {
                id: entry.id,
                is_player: entry.id.is_player(),
                lane: lane.lane,
                position: transform.position,
                rotation_z: transform.rotation_z,
                speed: drive.speed,
                distance: progress.distance_traveled,
                grid_row: slot.row,
                grid_col: slot.col,
            })
        })
        .collect()
}
