//! Simulation constants and tuning parameters.
//!
//! Values that a session may tune live in `RaceConfig`; the ones here are
//! fixed by the game feel and shared by every session.

/// Simulation tick rate (Hz). One tick per rendered frame.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Lateral control ---

/// Fraction of the remaining lateral distance covered per tick.
pub const LANE_SMOOTHING: f32 = 0.15;

/// Tilt per unit of remaining lateral distance.
pub const TILT_FACTOR: f32 = 0.2;

/// Fraction of the remaining tilt covered per tick.
pub const TILT_SMOOTHING: f32 = 0.1;

// --- Longitudinal control ---

/// Multiple of `accel_rate` added per tick while accelerating.
pub const THROTTLE_GAIN: f32 = 2.0;

/// Multiple of `accel_rate` removed per tick while braking.
pub const BRAKE_GAIN: f32 = 3.0;

/// Multiple of `accel_rate` removed per tick when coasting.
pub const COAST_DECAY: f32 = 0.5;

// --- Collision response ---

/// Speed factor applied to the trailing car of a rear-end collision.
pub const REAR_END_TRAILING_DAMPING: f32 = 0.6;

/// Speed factor applied to the leading car of a rear-end collision.
pub const REAR_END_LEADING_DAMPING: f32 = 0.8;

/// Speed factor applied to both cars of a side-swipe.
pub const SIDE_SWIPE_DAMPING: f32 = 0.7;

/// Longitudinal pushout as a fraction of car length.
pub const REAR_END_PUSHOUT_FACTOR: f32 = 0.8;

/// Lateral pushout as a fraction of lane width.
pub const SIDE_SWIPE_PUSHOUT_FACTOR: f32 = 0.6;

/// Maximum lateral nudge applied to the trailing car after a rear-end hit.
pub const REAR_END_LATERAL_NUDGE: f32 = 0.2;

// --- Countdown ---

/// First number shown by the start countdown.
pub const COUNTDOWN_START: u8 = 3;

/// Seconds each countdown number is displayed.
pub const COUNTDOWN_STEP_SECS: f64 = 1.0;

/// Seconds the "GO!" banner stays up once the race has started.
pub const GO_BANNER_SECS: f64 = 1.0;

// --- Camera rig ---

pub const CAMERA_HEIGHT: f32 = 5.0;
pub const CAMERA_DISTANCE: f32 = 8.0;
/// How far ahead of the player the camera looks.
pub const CAMERA_LOOK_AHEAD: f32 = 30.0;

// --- Messages ---

pub const PLAYER_WIN_MESSAGE: &str = "You win!";
