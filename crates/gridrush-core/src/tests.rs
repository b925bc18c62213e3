#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use crate::commands::PlayerCommand;
    use crate::config::RaceConfig;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::RaceEvent;
    use crate::state::{RaceSnapshot, StandingEntry, Standings};
    use crate::types::{Aabb, SimTime, VehicleId};

    // ---- Config ----

    #[test]
    fn test_default_config_is_valid() {
        let config = RaceConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.lane_width() - 5.0).abs() < 1e-6);
        assert!((config.player_max_speed() - 1.4).abs() < 1e-6);
        assert_eq!(config.racer_count(), 4);
    }

    #[test]
    fn test_lane_center_x() {
        let config = RaceConfig::default();
        assert!((config.lane_center_x(0) + 5.0).abs() < 1e-6);
        assert!(config.lane_center_x(1).abs() < 1e-6);
        assert!((config.lane_center_x(2) - 5.0).abs() < 1e-6);
        // Out-of-range lanes clamp to the outermost lane.
        assert!((config.lane_center_x(9) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_lane() {
        let config = RaceConfig::default();
        assert_eq!(config.clamp_lane(-1), 0);
        assert_eq!(config.clamp_lane(1), 1);
        assert_eq!(config.clamp_lane(7), 2);
    }

    #[test]
    fn test_zero_lanes_rejected() {
        let config = RaceConfig {
            lane_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoLanes)));
    }

    #[test]
    fn test_negative_competitor_count_rejected_at_parse() {
        let result = RaceConfig::from_json_str(r#"{ "competitor_count": -1 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RaceConfig::from_json_str(r#"{ "lane_count": 4, "road_width": 20.0 }"#)
            .expect("valid config");
        assert_eq!(config.lane_count, 4);
        assert_eq!(config.competitor_count, 3);
        assert!((config.lane_width() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let cases = vec![
            RaceConfig {
                road_width: 0.0,
                ..Default::default()
            },
            RaceConfig {
                accel_rate: -0.1,
                ..Default::default()
            },
            RaceConfig {
                speed_min: 2.0,
                speed_max: 1.0,
                ..Default::default()
            },
            RaceConfig {
                grid_rows: 0,
                ..Default::default()
            },
            RaceConfig {
                player_start_lane: 3,
                ..Default::default()
            },
            RaceConfig {
                collision_shrink_margin: 1.0,
                ..Default::default()
            },
            RaceConfig {
                race_distance: f32::NAN,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "should reject {config:?}");
        }
    }

    #[test]
    fn test_no_competitors_needs_no_rows() {
        let config = RaceConfig {
            competitor_count: 0,
            grid_rows: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    // ---- Aabb ----

    #[test]
    fn test_aabb_from_footprint_shrinks() {
        let aabb = Aabb::from_footprint(Vec3::new(1.0, 0.0, -10.0), 2.0, 4.0, 0.3);
        assert!((aabb.min.x - 0.3).abs() < 1e-6);
        assert!((aabb.max.x - 1.7).abs() < 1e-6);
        assert!((aabb.min.y + 11.7).abs() < 1e-6);
        assert!((aabb.max.y + 8.3).abs() < 1e-6);
    }

    #[test]
    fn test_aabb_intersection_requires_both_axes() {
        let a = Aabb {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(2.0, 4.0),
        };
        let overlapping = Aabb {
            min: Vec2::new(1.0, 3.0),
            max: Vec2::new(3.0, 7.0),
        };
        let x_only = Aabb {
            min: Vec2::new(1.0, 5.0),
            max: Vec2::new(3.0, 9.0),
        };
        let touching = Aabb {
            min: Vec2::new(2.0, 0.0),
            max: Vec2::new(4.0, 4.0),
        };
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
        assert!(!a.intersects(&x_only));
        assert!(!a.intersects(&touching), "touching boxes do not intersect");
    }

    #[test]
    fn test_aabb_overlap_depths() {
        let a = Aabb {
            min: Vec2::new(0.0, 0.0),
            max: Vec2::new(2.0, 4.0),
        };
        let b = Aabb {
            min: Vec2::new(1.5, 3.0),
            max: Vec2::new(3.5, 7.0),
        };
        assert!((a.x_overlap(&b) - 0.5).abs() < 1e-6);
        assert!((a.z_overlap(&b) - 1.0).abs() < 1e-6);
        assert!((b.z_overlap(&a) - 1.0).abs() < 1e-6);
    }

    // ---- Misc vocabulary ----

    #[test]
    fn test_vehicle_id() {
        assert!(VehicleId::PLAYER.is_player());
        assert_eq!(VehicleId::competitor(0), VehicleId(1));
        assert!(!VehicleId::competitor(0).is_player());
        assert_eq!(VehicleId::competitor(2).to_string(), "competitor#3");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..crate::constants::TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, crate::constants::TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_countdown_state_started() {
        assert!(!CountdownState::Idle.has_started());
        assert!(!CountdownState::Counting(1).has_started());
        assert!(CountdownState::Go.has_started());
        assert!(CountdownState::Racing.has_started());
    }

    #[test]
    fn test_standings_display_text() {
        let standings = Standings {
            entries: vec![StandingEntry {
                vehicle: VehicleId::PLAYER,
                rank: 2,
                distance: 10.0,
                is_player: true,
            }],
            player_rank: 2,
            total: 4,
        };
        assert_eq!(standings.display_text(), "Position: 2/4");
    }

    #[test]
    fn test_command_serde_tagged() {
        let json = serde_json::to_string(&PlayerCommand::SetAccelerate { held: true }).unwrap();
        assert_eq!(json, r#"{"type":"SetAccelerate","held":true}"#);
        let back: PlayerCommand = serde_json::from_str(r#"{"type":"SteerLeft"}"#).unwrap();
        assert_eq!(back, PlayerCommand::SteerLeft);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = RaceSnapshot {
            countdown: CountdownState::Counting(2),
            events: vec![
                RaceEvent::CountdownTick { remaining: 2 },
                RaceEvent::Collision {
                    a: VehicleId::PLAYER,
                    b: VehicleId(1),
                    kind: CollisionKind::RearEnd,
                    midpoint: Vec3::ZERO,
                },
            ],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"Counting\""));
        assert!(json.contains("\"RearEnd\""));
        let back: RaceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.countdown, CountdownState::Counting(2));
        assert_eq!(back.events.len(), 2);
    }
}
