use std::collections::HashSet;

use glam::Vec3;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gridrush_sim::core::commands::PlayerCommand;
use gridrush_sim::core::config::RaceConfig;
use gridrush_sim::core::events::RaceEvent;
use gridrush_sim::grid;
use gridrush_sim::systems::collision::{resolve_pair, Body};
use gridrush_sim::world_setup::footprint;
use gridrush_sim::{SimConfig, SimulationEngine};

const EPS: f32 = 1e-4;

fn command(code: u8) -> Option<PlayerCommand> {
    match code {
        0 => Some(PlayerCommand::SteerLeft),
        1 => Some(PlayerCommand::SteerRight),
        2 => Some(PlayerCommand::SetAccelerate { held: true }),
        3 => Some(PlayerCommand::SetAccelerate { held: false }),
        4 => Some(PlayerCommand::SetBrake { held: true }),
        5 => Some(PlayerCommand::SetBrake { held: false }),
        _ => None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn race_invariants_hold_under_random_input(
        seed in any::<u64>(),
        competitors in 0u32..7,
        inputs in prop::collection::vec(0u8..9, 200..600)
    ) {
        let race = RaceConfig {
            race_distance: 120.0,
            competitor_count: competitors,
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(SimConfig { seed, race: race.clone() }).unwrap();
        engine.queue_commands([PlayerCommand::StartRace, PlayerCommand::SetAccelerate { held: true }]);

        let racers = race.racer_count();
        let mut last_distance = vec![0.0f32; racers];
        let mut finished_events = 0;
        let mut frozen: Option<Vec<Vec3>> = None;
        let mut winner: Option<String> = None;

        for code in std::iter::repeat(9).take(180).chain(inputs) {
            if let Some(cmd) = command(code) {
                engine.queue_command(cmd);
            }
            let snap = engine.tick().unwrap();

            prop_assert_eq!(snap.vehicles.len(), racers);
            prop_assert_eq!(snap.standings.entries.len(), racers);
            prop_assert_eq!(snap.standings.total as usize, racers);
            prop_assert!(snap.standings.player_rank >= 1);
            prop_assert!(snap.standings.player_rank as usize <= racers);
            for (i, entry) in snap.standings.entries.iter().enumerate() {
                prop_assert_eq!(entry.rank as usize, i + 1);
            }
            for pair in snap.standings.entries.windows(2) {
                prop_assert!(pair[0].distance >= pair[1].distance);
            }

            for (i, vehicle) in snap.vehicles.iter().enumerate() {
                let top = if vehicle.is_player { race.player_max_speed() } else { race.speed_max };
                prop_assert!(vehicle.lane < race.lane_count);
                prop_assert!(vehicle.speed >= 0.0 && vehicle.speed <= top + EPS);
                prop_assert!(vehicle.distance >= last_distance[i]);
                last_distance[i] = vehicle.distance;
            }

            finished_events += snap
                .events
                .iter()
                .filter(|e| matches!(e, RaceEvent::Finished { .. }))
                .count();
            prop_assert!(finished_events <= 1);

            if let Some(positions) = &frozen {
                let now: Vec<Vec3> = snap.vehicles.iter().map(|v| v.position).collect();
                prop_assert_eq!(positions, &now);
                prop_assert_eq!(&winner, &snap.winner_message);
            } else if snap.race_finished {
                frozen = Some(snap.vehicles.iter().map(|v| v.position).collect());
                winner = snap.winner_message.clone();
                prop_assert!(winner.is_some());
            }
        }
    }

    #[test]
    fn grid_is_always_legal(
        seed in any::<u64>(),
        lane_count in 1u32..6,
        competitor_count in 0u32..14,
        grid_rows in 1u32..5,
        lane_pick in 0u32..6
    ) {
        let config = RaceConfig {
            lane_count,
            competitor_count,
            grid_rows,
            road_width: 5.0 * lane_count as f32,
            player_start_lane: lane_pick % lane_count,
            ..Default::default()
        };
        prop_assert!(config.validate().is_ok());

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let placements = grid::form_grid(&config, &mut rng);
        prop_assert_eq!(placements.len(), competitor_count as usize);

        let mut cells = HashSet::new();
        for p in &placements {
            prop_assert!(p.lane < lane_count);
            prop_assert!(cells.insert((p.row, p.lane)));
            prop_assert!(p.row != 0 || p.lane != config.player_start_lane);
        }
    }

    #[test]
    fn resolved_pairs_separate_on_resolved_axis(
        seed in any::<u64>(),
        dx in -1.35f32..1.35,
        dz in -3.35f32..3.35,
        speed_a in 0.0f32..1.4,
        speed_b in 0.0f32..1.4
    ) {
        let config = RaceConfig::default();
        let make = |id: u32, position: Vec3, speed: f32| Body {
            id: gridrush_sim::core::types::VehicleId(id),
            position,
            speed,
            aabb: footprint(&config, position),
        };
        let mut a = make(0, Vec3::new(0.0, 0.0, -50.0), speed_a);
        let mut b = make(1, Vec3::new(dx, 0.0, -50.0 + dz), speed_b);
        prop_assume!(a.aabb.intersects(&b.aabb));

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let resolution = resolve_pair(&mut a, &mut b, &config, &mut rng);
        prop_assert!(resolution.is_some());

        let separated_z = !a.aabb.overlaps_z(&b.aabb) || a.aabb.z_overlap(&b.aabb) < EPS;
        let separated_x = !a.aabb.overlaps_x(&b.aabb) || a.aabb.x_overlap(&b.aabb) < EPS;
        prop_assert!(separated_z || separated_x);
        prop_assert!(a.speed <= speed_a && b.speed <= speed_b);
        prop_assert!(a.speed >= 0.0 && b.speed >= 0.0);
    }
}
