//! Kinematic integration system.
//!
//! Advances speed, lane tracking and position for every vehicle once per
//! tick: the player from the input state, competitors from their autonomous
//! policy. Nothing moves before the start signal or after the finish.

use gridrush_core::components::{Competitor, Drive, LanePosition, Player, Progress, Transform};
use gridrush_core::config::RaceConfig;
use gridrush_core::constants::*;

use crate::session::RaceSession;

/// Normalized driver input.
///
/// `left`/`right` are edges: set by a press, consumed by one tick.
/// `accelerate`/`brake` are levels: held until released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

impl InputState {
    /// Drop pending lane-change edges so a held key never repeats.
    pub fn clear_edges(&mut self) {
        self.left = false;
        self.right = false;
    }
}

/// Run kinematic integration for the player, then every competitor.
/// Lane-change edges are always consumed, even when nothing moves.
pub fn run(session: &mut RaceSession, input: &mut InputState) {
    if session.is_active() {
        let config = &session.config;

        for (_entity, (_player, lane, transform, drive, progress)) in session.world.query_mut::<(
            &Player,
            &mut LanePosition,
            &mut Transform,
            &mut Drive,
            &mut Progress,
        )>() {
            step_player(config, input, lane, transform, drive, progress);
        }

        for (_entity, (_competitor, transform, drive, progress)) in session
            .world
            .query_mut::<(&Competitor, &mut Transform, &mut Drive, &mut Progress)>()
        {
            step_competitor(config, transform, drive, progress);
        }
    }

    input.clear_edges();
}

/// Advance the player car by one tick.
pub fn step_player(
    config: &RaceConfig,
    input: &InputState,
    lane: &mut LanePosition,
    transform: &mut Transform,
    drive: &mut Drive,
    progress: &mut Progress,
) {
    // Discrete lane change.
    if input.left && lane.lane > 0 {
        lane.lane -= 1;
    }
    if input.right && lane.lane + 1 < config.lane_count {
        lane.lane += 1;
    }
    lane.lane = config.clamp_lane(lane.lane as i64);

    // Ease toward the lane centre.
    let target_x = config.lane_center_x(lane.lane);
    transform.position.x += (target_x - transform.position.x) * LANE_SMOOTHING;

    let target_tilt = (target_x - transform.position.x) * TILT_FACTOR;
    transform.rotation_z += (target_tilt - transform.rotation_z) * TILT_SMOOTHING;

    // Accelerate and brake are independent; both apply if both are held.
    if input.accelerate {
        drive.speed = (drive.speed + config.accel_rate * THROTTLE_GAIN).min(drive.max_speed);
    }
    if input.brake {
        drive.speed = (drive.speed - config.accel_rate * BRAKE_GAIN).max(0.0);
    }
    if !input.accelerate && !input.brake {
        drive.speed = (drive.speed - config.accel_rate * COAST_DECAY).max(0.0);
    }
    drive.speed = drive.speed.clamp(0.0, drive.max_speed);

    advance(transform, drive, progress);
}

/// Advance a competitor by one tick: accelerate toward its top speed.
pub fn step_competitor(
    config: &RaceConfig,
    transform: &mut Transform,
    drive: &mut Drive,
    progress: &mut Progress,
) {
    drive.speed = (drive.speed + config.accel_rate).clamp(0.0, drive.max_speed);
    advance(transform, drive, progress);
}

/// Forward is -z; distance accumulates the same amount.
fn advance(transform: &mut Transform, drive: &Drive, progress: &mut Progress) {
    transform.position.z -= drive.speed;
    progress.distance_traveled += drive.speed;
}
