//! Data-driven game balance
//!
//! Every physics and pool constant the simulation reads. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, RunnerError};

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub ground_level: f32,
    pub ceiling: f32,
    pub horizontal_bounds: f32,
    pub start_line: f32,
    pub max_frame_delta: f32,

    // === Player ===
    pub gravity: f32,
    pub flap_strength: f32,
    pub max_fall_speed: f32,
    pub forward_speed: f32,
    pub horizontal_acceleration: f32,
    pub max_horizontal_speed: f32,
    pub horizontal_drag: f32,
    pub drift_snap_speed: f32,
    pub spawn_height: f32,
    pub player_half_extents: Vec3,
    pub ceiling_bounce_speed: f32,

    // === Obstacles ===
    pub obstacle_count: usize,
    pub obstacle_gap: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_spacing: f32,
    pub obstacle_start: f32,
    pub min_gap_center: f32,
    pub max_gap_center: f32,
    pub max_oscillation: f32,
    pub min_oscillation_freq: f32,
    pub max_oscillation_freq: f32,
    pub collision_gate_margin: f32,
    pub recycle_spacings: f32,
    pub obstacle_score: u64,

    // === Collectibles ===
    pub collectible_count: usize,
    pub collectible_distance: f32,
    pub collectible_spawn_ahead: f32,
    pub collectible_spin_speed: f32,
    pub collectible_size: f32,
    pub collectible_score: u64,
    pub collectible_expire_behind: f32,
    pub collectible_height_center: f32,
    pub collectible_height_spread: f32,
    pub collectible_width_fill: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground_level: GROUND_LEVEL,
            ceiling: CEILING,
            horizontal_bounds: HORIZONTAL_BOUNDS,
            start_line: START_LINE,
            max_frame_delta: MAX_FRAME_DELTA,

            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
            max_fall_speed: MAX_FALL_SPEED,
            forward_speed: FORWARD_SPEED,
            horizontal_acceleration: HORIZONTAL_ACCELERATION,
            max_horizontal_speed: MAX_HORIZONTAL_SPEED,
            horizontal_drag: HORIZONTAL_DRAG,
            drift_snap_speed: DRIFT_SNAP_SPEED,
            spawn_height: PLAYER_SPAWN_HEIGHT,
            player_half_extents: Vec3::new(
                PLAYER_HALF_WIDTH,
                PLAYER_HALF_HEIGHT,
                PLAYER_HALF_LENGTH,
            ),
            ceiling_bounce_speed: CEILING_BOUNCE_SPEED,

            obstacle_count: OBSTACLE_COUNT,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_spacing: OBSTACLE_SPACING,
            obstacle_start: OBSTACLE_START,
            min_gap_center: MIN_GAP_CENTER,
            max_gap_center: MAX_GAP_CENTER,
            max_oscillation: MAX_OSCILLATION,
            min_oscillation_freq: MIN_OSCILLATION_FREQ,
            max_oscillation_freq: MAX_OSCILLATION_FREQ,
            collision_gate_margin: COLLISION_GATE_MARGIN,
            recycle_spacings: RECYCLE_SPACINGS,
            obstacle_score: OBSTACLE_SCORE,

            collectible_count: COLLECTIBLE_COUNT,
            collectible_distance: COLLECTIBLE_DISTANCE,
            collectible_spawn_ahead: COLLECTIBLE_SPAWN_AHEAD,
            collectible_spin_speed: COLLECTIBLE_SPIN_SPEED,
            collectible_size: COLLECTIBLE_SIZE,
            collectible_score: COLLECTIBLE_SCORE,
            collectible_expire_behind: COLLECTIBLE_EXPIRE_BEHIND,
            collectible_height_center: COLLECTIBLE_HEIGHT_CENTER,
            collectible_height_spread: COLLECTIBLE_HEIGHT_SPREAD,
            collectible_width_fill: COLLECTIBLE_WIDTH_FILL,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Half the player's vertical extent (ground and ceiling checks)
    pub fn player_half_height(&self) -> f32 {
        self.player_half_extents.y
    }

    /// Half-width of the travel-axis band in which obstacles are collision tested
    pub fn collision_gate(&self) -> f32 {
        self.obstacle_width / 2.0 + self.collision_gate_margin
    }

    /// Reject configurations the simulation cannot run correctly
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(RunnerError::InvalidTuning(msg));

        if self.obstacle_count == 0 {
            return invalid("obstacle_count must be at least 1".into());
        }
        if self.collectible_count == 0 {
            return invalid("collectible_count must be at least 1".into());
        }
        let half_height = self.player_half_height();
        if self.ground_level + half_height >= self.ceiling - half_height {
            return invalid(format!(
                "no room between ground {} and ceiling {}",
                self.ground_level, self.ceiling
            ));
        }
        if self.min_gap_center >= self.max_gap_center {
            return invalid(format!(
                "min_gap_center {} must be below max_gap_center {}",
                self.min_gap_center, self.max_gap_center
            ));
        }
        if self.min_oscillation_freq >= self.max_oscillation_freq {
            return invalid("min_oscillation_freq must be below max_oscillation_freq".into());
        }
        for (name, value) in [
            ("forward_speed", self.forward_speed),
            ("obstacle_spacing", self.obstacle_spacing),
            ("collectible_distance", self.collectible_distance),
            ("max_frame_delta", self.max_frame_delta),
            ("max_fall_speed", self.max_fall_speed),
            ("max_horizontal_speed", self.max_horizontal_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if !(0.0..=1.0).contains(&self.horizontal_drag) {
            return invalid(format!(
                "horizontal_drag must be within [0, 1], got {}",
                self.horizontal_drag
            ));
        }

        // The obstacle test only runs inside the gate band; one frame of travel
        // must not be able to jump across it.
        let max_step = self.forward_speed * self.max_frame_delta;
        if max_step > self.collision_gate() {
            return invalid(format!(
                "forward travel per frame ({max_step}) exceeds the collision gate ({})",
                self.collision_gate()
            ));
        }

        Ok(())
    }
}
