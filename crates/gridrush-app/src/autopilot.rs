//! Autopilot input source.
//!
//! Drives the player car from snapshots alone, producing the same
//! `PlayerCommand` stream a keyboard would: start the countdown, hold the
//! accelerator, and hop one lane when a slower car blocks the way.

use gridrush_core::commands::PlayerCommand;
use gridrush_core::enums::CountdownState;
use gridrush_core::state::{RaceSnapshot, VehicleView};

/// How far ahead (world units) a car counts as blocking.
const DEFAULT_LOOKAHEAD: f32 = 12.0;
/// Minimum ticks between two lane changes.
const DEFAULT_LANE_CHANGE_COOLDOWN: u64 = 30;

#[derive(Debug, Clone)]
pub struct Autopilot {
    lane_count: u32,
    lookahead: f32,
    cooldown_ticks: u64,
    start_requested: bool,
    accelerating: bool,
    last_lane_change: Option<u64>,
}

impl Autopilot {
    pub fn new(lane_count: u32) -> Self {
        Self {
            lane_count,
            lookahead: DEFAULT_LOOKAHEAD,
            cooldown_ticks: DEFAULT_LANE_CHANGE_COOLDOWN,
            start_requested: false,
            accelerating: false,
            last_lane_change: None,
        }
    }

    /// Commands to queue for the next tick, given the latest snapshot.
    /// `None` means no tick has run yet.
    pub fn commands(&mut self, snapshot: Option<&RaceSnapshot>) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();

        let countdown = snapshot.map(|s| s.countdown).unwrap_or_default();
        if countdown == CountdownState::Idle && !self.start_requested {
            self.start_requested = true;
            commands.push(PlayerCommand::StartRace);
        }

        let Some(snapshot) = snapshot else {
            return commands;
        };

        if snapshot.race_finished {
            if self.accelerating {
                self.accelerating = false;
                commands.push(PlayerCommand::SetAccelerate { held: false });
            }
            return commands;
        }

        // Hold the throttle through the countdown so the car launches on GO.
        if !self.accelerating {
            self.accelerating = true;
            commands.push(PlayerCommand::SetAccelerate { held: true });
        }

        if snapshot.race_started {
            if let Some(steer) = self.steer(snapshot) {
                self.last_lane_change = Some(snapshot.time.tick);
                commands.push(steer);
            }
        }

        commands
    }

    /// Pick a lane change away from a blocking car, if one is possible.
    fn steer(&self, snapshot: &RaceSnapshot) -> Option<PlayerCommand> {
        if let Some(last) = self.last_lane_change {
            if snapshot.time.tick < last + self.cooldown_ticks {
                return None;
            }
        }

        let player = snapshot.vehicles.iter().find(|v| v.is_player)?;
        if !self.blocked(snapshot, player, player.lane) {
            return None;
        }

        let left = player.lane.checked_sub(1);
        let right = (player.lane + 1 < self.lane_count).then_some(player.lane + 1);

        match (left, right) {
            (Some(lane), _) if !self.blocked(snapshot, player, lane) => Some(PlayerCommand::SteerLeft),
            (_, Some(lane)) if !self.blocked(snapshot, player, lane) => Some(PlayerCommand::SteerRight),
            _ => None,
        }
    }

    /// Whether any competitor in `lane` sits within the lookahead window in
    /// front of (or alongside) the player.
    fn blocked(&self, snapshot: &RaceSnapshot, player: &VehicleView, lane: u32) -> bool {
        snapshot.vehicles.iter().any(|v| {
            let ahead = player.position.z - v.position.z;
            !v.is_player && v.lane == lane && ahead > -2.0 && ahead < self.lookahead
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use gridrush_core::types::{SimTime, VehicleId};

    fn view(id: u32, lane: u32, z: f32) -> VehicleView {
        VehicleView {
            id: VehicleId(id),
            is_player: id == 0,
            lane,
            position: Vec3::new(0.0, 0.0, z),
            rotation_z: 0.0,
            speed: 0.5,
            distance: -z,
            grid_row: 0,
            grid_col: lane,
        }
    }

    fn racing(tick: u64, vehicles: Vec<VehicleView>) -> RaceSnapshot {
        RaceSnapshot {
            time: SimTime {
                tick,
                elapsed_secs: 0.0,
            },
            countdown: CountdownState::Racing,
            race_started: true,
            vehicles,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_race_once() {
        let mut pilot = Autopilot::new(3);
        assert_eq!(pilot.commands(None), vec![PlayerCommand::StartRace]);

        let idle = RaceSnapshot::default();
        let commands = pilot.commands(Some(&idle));
        assert!(!commands.contains(&PlayerCommand::StartRace));
        assert!(commands.contains(&PlayerCommand::SetAccelerate { held: true }));
        assert!(pilot.commands(Some(&idle)).is_empty(), "throttle stays held");
    }

    #[test]
    fn test_steers_around_blocker() {
        let mut pilot = Autopilot::new(3);
        pilot.commands(None);
        let snap = racing(300, vec![view(0, 1, -100.0), view(1, 1, -105.0)]);
        let commands = pilot.commands(Some(&snap));
        assert!(commands.contains(&PlayerCommand::SteerLeft));
    }

    #[test]
    fn test_picks_free_side() {
        let mut pilot = Autopilot::new(3);
        pilot.commands(None);
        let snap = racing(
            300,
            vec![view(0, 1, -100.0), view(1, 1, -105.0), view(2, 0, -103.0)],
        );
        assert!(pilot.commands(Some(&snap)).contains(&PlayerCommand::SteerRight));
    }

    #[test]
    fn test_lane_change_cooldown() {
        let mut pilot = Autopilot::new(3);
        pilot.commands(None);
        let snap = racing(300, vec![view(0, 1, -100.0), view(1, 1, -105.0)]);
        assert!(pilot.commands(Some(&snap)).contains(&PlayerCommand::SteerLeft));

        let snap = racing(310, vec![view(0, 0, -110.0), view(1, 0, -112.0)]);
        assert!(!pilot.commands(Some(&snap)).contains(&PlayerCommand::SteerRight));

        let snap = racing(340, vec![view(0, 0, -110.0), view(1, 0, -112.0)]);
        assert!(pilot.commands(Some(&snap)).contains(&PlayerCommand::SteerRight));
    }

    #[test]
    fn test_clear_road_no_steering() {
        let mut pilot = Autopilot::new(3);
        pilot.commands(None);
        let snap = racing(300, vec![view(0, 1, -100.0), view(1, 1, -140.0), view(2, 1, -90.0)]);
        let commands = pilot.commands(Some(&snap));
        assert!(!commands.contains(&PlayerCommand::SteerLeft));
        assert!(!commands.contains(&PlayerCommand::SteerRight));
    }

    #[test]
    fn test_releases_throttle_after_finish() {
        let mut pilot = Autopilot::new(3);
        pilot.commands(None);
        pilot.commands(Some(&racing(300, vec![view(0, 1, -100.0)])));

        let mut done = racing(301, vec![view(0, 1, -500.0)]);
        done.race_finished = true;
        assert_eq!(
            pilot.commands(Some(&done)),
            vec![PlayerCommand::SetAccelerate { held: false }]
        );
        assert!(pilot.commands(Some(&done)).is_empty());
    }
}
