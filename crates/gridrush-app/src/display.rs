//! Text rendering of standings and results for the terminal host.

use std::fmt::Write;

use gridrush_core::state::{RaceSnapshot, Standings};

/// One-line status: tick, countdown or position, player speed.
pub fn status_line(snapshot: &RaceSnapshot) -> String {
    let speed = snapshot
        .vehicles
        .iter()
        .find(|v| v.is_player)
        .map(|v| v.speed)
        .unwrap_or_default();

    if snapshot.race_started {
        format!(
            "tick {} | {} | speed {:.2}",
            snapshot.time.tick,
            snapshot.standings.display_text(),
            speed
        )
    } else {
        format!("tick {} | {:?}", snapshot.time.tick, snapshot.countdown)
    }
}

/// Leaderboard, one racer per line, leader first.
pub fn leaderboard(standings: &Standings) -> String {
    let mut out = String::new();
    for entry in &standings.entries {
        let marker = if entry.is_player { " <" } else { "" };
        let _ = writeln!(
            out,
            "{:>2}. {:<14} {:>8.1}{}",
            entry.rank,
            entry.vehicle.to_string(),
            entry.distance,
            marker
        );
    }
    out
}

/// Final report printed when the host exits.
pub fn final_report(snapshot: &RaceSnapshot) -> String {
    let headline = match &snapshot.winner_message {
        Some(message) => message.clone(),
        None => "Race not finished".to_string(),
    };
    format!(
        "{headline}\n{}\n{}",
        snapshot.standings.display_text(),
        leaderboard(&snapshot.standings)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridrush_core::enums::CountdownState;
    use gridrush_core::state::StandingEntry;
    use gridrush_core::types::VehicleId;

    fn standings() -> Standings {
        Standings {
            entries: vec![
                StandingEntry {
                    vehicle: VehicleId(2),
                    rank: 1,
                    distance: 120.0,
                    is_player: false,
                },
                StandingEntry {
                    vehicle: VehicleId::PLAYER,
                    rank: 2,
                    distance: 80.5,
                    is_player: true,
                },
            ],
            player_rank: 2,
            total: 2,
        }
    }

    #[test]
    fn test_leaderboard_marks_player() {
        let text = leaderboard(&standings());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("competitor#2"));
        assert!(lines[1].contains("player"));
        assert!(lines[1].ends_with('<'));
        assert!(lines[1].contains("80.5"));
    }

    #[test]
    fn test_status_line() {
        let mut snap = RaceSnapshot {
            countdown: CountdownState::Counting(2),
            ..Default::default()
        };
        assert_eq!(status_line(&snap), "tick 0 | Counting(2)");

        snap.race_started = true;
        snap.standings = standings();
        assert!(status_line(&snap).contains("Position: 2/2"));
    }

    #[test]
    fn test_final_report() {
        let mut snap = RaceSnapshot {
            standings: standings(),
            ..Default::default()
        };
        assert!(final_report(&snap).starts_with("Race not finished\nPosition: 2/2"));

        snap.winner_message = Some("Competitor 2 wins!".into());
        assert!(final_report(&snap).starts_with("Competitor 2 wins!"));
    }
}
