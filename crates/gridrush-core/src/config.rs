//! Race configuration: track geometry, fleet size and tuning.
//!
//! A `RaceConfig` is fixed for the lifetime of a session. Construction goes
//! through `validate`, so every engine works with a known-good config.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable per-session race configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Full road width in world units.
    pub road_width: f32,
    pub lane_count: u32,
    /// Distance a racer must cover to finish.
    pub race_distance: f32,
    pub car_length: f32,
    pub car_width: f32,
    /// Lower bound of the random competitor top speed.
    pub speed_min: f32,
    /// Upper bound of the random competitor top speed.
    pub speed_max: f32,
    /// Added to `speed_max` to get the player's top speed.
    pub player_speed_bonus: f32,
    /// Base acceleration per tick.
    pub accel_rate: f32,
    pub competitor_count: u32,
    pub grid_rows: u32,
    /// Longitudinal gap between grid rows.
    pub grid_row_spacing: f32,
    /// Extra offset applied to odd rows.
    pub grid_stagger_offset: f32,
    /// How far ahead of row 0 the player starts.
    pub player_grid_lead: f32,
    pub player_start_lane: u32,
    /// Inset applied to every side of the car footprint for collisions.
    pub collision_shrink_margin: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            road_width: 15.0,
            lane_count: 3,
            race_distance: 500.0,
            car_length: 4.0,
            car_width: 2.0,
            speed_min: 0.8,
            speed_max: 1.2,
            player_speed_bonus: 0.2,
            accel_rate: 0.005,
            competitor_count: 3,
            grid_rows: 2,
            grid_row_spacing: 8.0,
            grid_stagger_offset: 2.0,
            player_grid_lead: 2.0,
            player_start_lane: 1,
            collision_shrink_margin: 0.3,
        }
    }
}

impl RaceConfig {
    /// Parse a JSON document (missing fields take defaults) and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RaceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Width of one lane.
    pub fn lane_width(&self) -> f32 {
        self.road_width / self.lane_count as f32
    }

    /// World x of the centre of `lane`. Out-of-range lanes are clamped.
    pub fn lane_center_x(&self, lane: u32) -> f32 {
        let lane = self.clamp_lane(lane as i64);
        -self.road_width / 2.0 + (lane as f32 + 0.5) * self.lane_width()
    }

    /// Clamp an arbitrary lane index into `[0, lane_count)`.
    pub fn clamp_lane(&self, lane: i64) -> u32 {
        lane.clamp(0, self.lane_count.saturating_sub(1) as i64) as u32
    }

    pub fn player_max_speed(&self) -> f32 {
        self.speed_max + self.player_speed_bonus
    }

    /// Total racers including the player.
    pub fn racer_count(&self) -> usize {
        self.competitor_count as usize + 1
    }

    /// Check every field. Called by the engine before a session is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::NoLanes);
        }

        for (field, value) in [
            ("road_width", self.road_width),
            ("race_distance", self.race_distance),
            ("car_length", self.car_length),
            ("car_width", self.car_width),
            ("accel_rate", self.accel_rate),
            ("grid_row_spacing", self.grid_row_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let player_max = self.player_max_speed();
        if !self.speed_min.is_finite()
            || !self.speed_max.is_finite()
            || self.speed_min < 0.0
            || self.speed_max < self.speed_min
            || !player_max.is_finite()
            || player_max < 0.0
        {
            return Err(ConfigError::InvalidSpeedRange {
                min: self.speed_min,
                max: self.speed_max,
            });
        }

        if self.competitor_count > 0 && self.grid_rows == 0 {
            return Err(ConfigError::NoGridRows);
        }

        if self.player_start_lane >= self.lane_count {
            return Err(ConfigError::PlayerLaneOutOfRange {
                lane: self.player_start_lane,
                lane_count: self.lane_count,
            });
        }

        let margin = self.collision_shrink_margin;
        if !margin.is_finite()
            || margin < 0.0
            || margin * 2.0 >= self.car_width.min(self.car_length)
        {
            return Err(ConfigError::InvalidShrinkMargin {
                margin,
                width: self.car_width,
                length: self.car_length,
            });
        }

        Ok(())
    }
}
