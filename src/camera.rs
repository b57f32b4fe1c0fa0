//! Chase camera that trails the player
//!
//! The host renderer reads `position` and `look_at` from each snapshot.

use glam::Vec3;
use serde::Serialize;

use crate::frame_decay;

/// Camera sits behind and above the player
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 2.5, -6.0);
/// Point ahead of the player the camera aims at
pub const CAMERA_LOOK_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 10.0);
/// Fraction of the gap left after one 60 Hz frame
pub const CAMERA_DAMPING: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FollowCamera {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl FollowCamera {
    /// Camera already settled on `target`
    pub fn new(target: Vec3) -> Self {
        Self {
            position: target + CAMERA_OFFSET,
            look_at: target + CAMERA_LOOK_OFFSET,
        }
    }

    /// Ease toward `target`; the aim point follows without lag
    pub fn follow(&mut self, target: Vec3, dt: f32) {
        let t = (1.0 - frame_decay(CAMERA_DAMPING, dt)).clamp(0.0, 1.0);
        self.position = self.position.lerp(target + CAMERA_OFFSET, t);
        self.look_at = target + CAMERA_LOOK_OFFSET;
    }

    pub fn snap(&mut self, target: Vec3) {
        *self = Self::new(target);
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
