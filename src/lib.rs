//! Sky Runner - An endless 3D flying runner
//!
//! Core modules:
//! - `sim`: Simulation (player physics, recycled obstacle/collectible pools, scoring)
//! - `game`: Frame driver (session transitions, audio, high score, camera)
//! - `snapshot`: Render-facing view of the world
//! - `storage`: Key-value persistence (files natively, LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod autopilot;
pub mod camera;
pub mod error;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod storage;
pub mod tilt;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Result, RunnerError};
pub use game::{FrameReport, Game};
pub use highscores::HighScore;
pub use settings::Settings;
pub use snapshot::WorldSnapshot;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Frames with a larger delta than this skip the gameplay update
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// World limits
    pub const GROUND_LEVEL: f32 = -5.0;
    pub const CEILING: f32 = 10.0;
    pub const HORIZONTAL_BOUNDS: f32 = 5.0;
    /// Travel-axis line the player is pinned to
    pub const START_LINE: f32 = 0.0;

    /// Player physics
    pub const GRAVITY: f32 = 30.0;
    pub const FLAP_STRENGTH: f32 = 10.0;
    pub const MAX_FALL_SPEED: f32 = 15.0;
    pub const FORWARD_SPEED: f32 = 6.0;
    pub const HORIZONTAL_ACCELERATION: f32 = 40.0;
    pub const MAX_HORIZONTAL_SPEED: f32 = 8.0;
    /// Per-60th-of-a-second velocity multiplier while coasting
    pub const HORIZONTAL_DRAG: f32 = 0.92;
    /// Coasting speeds below this snap to zero
    pub const DRIFT_SNAP_SPEED: f32 = 0.1;
    pub const PLAYER_SPAWN_HEIGHT: f32 = 2.0;
    /// Half extents of the player box (wingspan, body height, body length)
    pub const PLAYER_HALF_WIDTH: f32 = 1.0;
    pub const PLAYER_HALF_HEIGHT: f32 = 0.1;
    pub const PLAYER_HALF_LENGTH: f32 = 0.5;
    /// Upward speed replaced by this on touching the ceiling
    pub const CEILING_BOUNCE_SPEED: f32 = -1.0;

    /// Obstacles
    pub const OBSTACLE_COUNT: usize = 5;
    pub const OBSTACLE_GAP: f32 = 4.0;
    pub const OBSTACLE_WIDTH: f32 = 1.5;
    pub const OBSTACLE_HEIGHT: f32 = 10.0;
    pub const OBSTACLE_SPACING: f32 = 12.0;
    pub const OBSTACLE_START: f32 = 40.0;
    pub const MIN_GAP_CENTER: f32 = -1.0;
    pub const MAX_GAP_CENTER: f32 = 4.0;
    pub const MAX_OSCILLATION: f32 = 2.0;
    pub const MIN_OSCILLATION_FREQ: f32 = 0.5;
    pub const MAX_OSCILLATION_FREQ: f32 = 1.0;
    /// Extra travel-axis slack around an obstacle before it is collision tested
    pub const COLLISION_GATE_MARGIN: f32 = 0.5;
    /// Obstacles this many spacings behind the start line are recycled
    pub const RECYCLE_SPACINGS: f32 = 1.5;

    /// Collectibles
    pub const COLLECTIBLE_COUNT: usize = 10;
    pub const COLLECTIBLE_DISTANCE: f32 = 8.0;
    pub const COLLECTIBLE_SPAWN_AHEAD: f32 = 50.0;
    pub const COLLECTIBLE_SPIN_SPEED: f32 = 2.0;
    pub const COLLECTIBLE_SIZE: f32 = 0.3;
    pub const COLLECTIBLE_SCORE: u64 = 5;
    /// Uncollected items this far behind the player expire
    pub const COLLECTIBLE_EXPIRE_BEHIND: f32 = 5.0;
    /// Collectibles spawn at 1 +/- this around mid-height
    pub const COLLECTIBLE_HEIGHT_CENTER: f32 = 1.0;
    pub const COLLECTIBLE_HEIGHT_SPREAD: f32 = 3.0;
    /// Fraction of the horizontal bounds collectibles may spawn across
    pub const COLLECTIBLE_WIDTH_FILL: f32 = 0.9;

    /// Points per obstacle cleared
    pub const OBSTACLE_SCORE: u64 = 1;
}

/// Frame-rate independent decay: `base` is the multiplier for one 60 Hz frame
#[inline]
pub fn frame_decay(base: f32, dt: f32) -> f32 {
    base.powf(dt * 60.0)
}
