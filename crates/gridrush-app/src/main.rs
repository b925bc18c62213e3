use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridrush_app::display;
use gridrush_app::game_loop::{self, LoopSettings};
use gridrush_app::state::AppState;
use gridrush_core::config::RaceConfig;
use gridrush_core::constants::TICK_RATE;
use gridrush_sim::engine::{SimConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "GRIDRUSH lane racer (headless)")]
struct Args {
    /// Race configuration as JSON. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed; the same seed replays the same race.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Stop after this many ticks even if nobody has finished.
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,
    /// Simulation rate used for pacing and status logging.
    #[arg(long, default_value_t = TICK_RATE)]
    tick_rate_hz: u32,
    /// Pace ticks in wall-clock time instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Print the final snapshot as JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<RaceConfig> {
    let Some(path) = path else {
        return Ok(RaceConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    RaceConfig::from_json_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let race = load_config(args.config.as_ref())?;
    info!(
        seed = args.seed,
        lanes = race.lane_count,
        competitors = race.competitor_count,
        distance = race.race_distance,
        "starting race"
    );
    let engine = SimulationEngine::new(SimConfig {
        seed: args.seed,
        race,
    })
    .context("invalid race configuration")?;

    let state = AppState::new();
    let settings = LoopSettings {
        tick_rate_hz: args.tick_rate_hz,
        realtime: args.realtime,
        max_ticks: Some(args.ticks),
        ..Default::default()
    };
    let (tx, handle) = game_loop::spawn_game_loop(engine, settings, state.latest_snapshot.clone())
        .context("spawn game loop")?;
    state.attach(tx)?;

    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))??;
    state.shutdown()?;
    info!(ticks = summary.ticks, reason = ?summary.reason, "done");

    if let Some(snapshot) = state.snapshot()? {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!("{}", display::final_report(&snapshot));
        }
    }
    Ok(())
}
