//! Starting grid formation.
//!
//! Seats the competitors into staggered rows next to the player's slot with
//! shuffled lanes, so every restart produces a different but always legal grid.

use rand::seq::SliceRandom;
use rand::Rng;

use gridrush_core::config::RaceConfig;

/// Where one competitor starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlacement {
    /// 0-based competitor index.
    pub index: u32,
    pub row: u32,
    pub lane: u32,
    pub x: f32,
    pub z: f32,
}

/// Compute the starting grid for `config.competitor_count` competitors.
///
/// Each row seats at most `min(lane_count, ceil(count / grid_rows))` cars in
/// distinct lanes. Row 0 never uses the player's lane. When a row runs out of
/// free lanes the remaining cars spill into the next row, appending rows past
/// `grid_rows` if needed.
pub fn form_grid<R: Rng + ?Sized>(config: &RaceConfig, rng: &mut R) -> Vec<GridPlacement> {
    let count = config.competitor_count;
    if count == 0 {
        return Vec::new();
    }

    let cars_per_row = config.lane_count.min(count.div_ceil(config.grid_rows.max(1)));
    let mut placements = Vec::with_capacity(count as usize);
    let mut row = 0u32;

    while (placements.len() as u32) < count {
        let mut lanes: Vec<u32> = (0..config.lane_count)
            .filter(|&lane| row != 0 || lane != config.player_start_lane)
            .collect();
        lanes.shuffle(rng);

        let remaining = count - placements.len() as u32;
        let seats = cars_per_row.min(lanes.len() as u32).min(remaining);
        let z = row_z(config, row);

        for &lane in lanes.iter().take(seats as usize) {
            placements.push(GridPlacement {
                index: placements.len() as u32,
                row,
                lane,
                x: config.lane_center_x(lane),
                z,
            });
        }
        row += 1;
    }

    placements
}

/// World z of grid row `row`. Odd rows are staggered so the grid is not a wall.
pub fn row_z(config: &RaceConfig, row: u32) -> f32 {
    let stagger = if row % 2 == 1 {
        config.grid_stagger_offset
    } else {
        0.0
    };
    -(config.grid_row_spacing * row as f32 + stagger)
}

/// World z of the player's starting slot, just ahead of row 0.
pub fn player_start_z(config: &RaceConfig) -> f32 {
    -config.player_grid_lead
}
