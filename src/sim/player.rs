//! Player physics body
//!
//! The player never moves along the travel axis; the world streams past it.
//! Only vertical (flap + gravity) and lateral (steering + drag) motion is
//! integrated here.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::frame_decay;
use crate::tuning::Tuning;

/// Held steering keys, consumed each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteerIntent {
    /// Toward -x
    pub left: bool,
    /// Toward +x
    pub right: bool,
}

impl SteerIntent {
    /// Signed acceleration direction: -1, 0 or +1
    pub fn axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }
}

/// Result of a single integrate step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    /// Still airborne
    Airborne,
    /// Touched the ceiling and was pushed back down (non-fatal)
    CeilingBounce,
    /// Hit the ground (fatal)
    GroundBreach,
}

/// The flying player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    pub pos: Vec3,
    /// Only x and y are integrated; z is always 0
    pub vel: Vec3,
    pub half_extents: Vec3,
    pub intent: SteerIntent,
    /// Always matches `pos` after `integrate` or `respawn`
    pub bounds: Aabb,
}

impl PlayerBody {
    pub fn new(tuning: &Tuning) -> Self {
        let mut body = Self {
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            half_extents: tuning.player_half_extents,
            intent: SteerIntent::default(),
            bounds: Aabb::default(),
        };
        body.respawn(tuning);
        body
    }

    /// Put the player back at the spawn point, at rest, with no keys held
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.pos = Vec3::new(0.0, tuning.spawn_height, tuning.start_line);
        self.vel = Vec3::ZERO;
        self.half_extents = tuning.player_half_extents;
        self.intent = SteerIntent::default();
        self.refresh_bounds();
    }

    /// Upward impulse. Replaces the current vertical speed rather than adding to it.
    pub fn apply_flap(&mut self, tuning: &Tuning) {
        self.vel.y = tuning.flap_strength;
    }

    pub fn set_horizontal_intent(&mut self, left: bool, right: bool) {
        self.intent = SteerIntent { left, right };
    }

    pub fn half_height(&self) -> f32 {
        self.half_extents.y
    }

    /// Advance the body by `dt` seconds
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) -> PlayerStep {
        // Vertical
        self.vel.y -= tuning.gravity * dt;
        self.vel.y = self.vel.y.max(-tuning.max_fall_speed);
        self.pos.y += self.vel.y * dt;

        // Horizontal
        let accel = self.intent.axis() * tuning.horizontal_acceleration;
        self.vel.x += accel * dt;
        // Coast when not pushing along the current direction of motion
        if accel == 0.0 || accel.signum() != self.vel.x.signum() {
            self.vel.x *= frame_decay(tuning.horizontal_drag, dt);
            if self.vel.x.abs() < tuning.drift_snap_speed {
                self.vel.x = 0.0;
            }
        }
        self.vel.x = self
            .vel
            .x
            .clamp(-tuning.max_horizontal_speed, tuning.max_horizontal_speed);
        self.pos.x += self.vel.x * dt;
        self.pos.x = self
            .pos
            .x
            .clamp(-tuning.horizontal_bounds, tuning.horizontal_bounds);

        // Pinned on the travel axis
        self.pos.z = tuning.start_line;
        self.vel.z = 0.0;

        let half_height = self.half_height();
        let step = if self.pos.y - half_height <= tuning.ground_level {
            self.pos.y = tuning.ground_level + half_height;
            self.vel.y = 0.0;
            PlayerStep::GroundBreach
        } else if self.pos.y + half_height >= tuning.ceiling {
            self.pos.y = tuning.ceiling - half_height;
            if self.vel.y > 0.0 {
                self.vel.y = tuning.ceiling_bounce_speed;
            }
            PlayerStep::CeilingBounce
        } else {
            PlayerStep::Airborne
        };

        self.refresh_bounds();
        step
    }

    /// Recompute the bounding box from the current position
    pub fn refresh_bounds(&mut self) {
        self.bounds = Aabb::from_center(self.pos, self.half_extents);
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> (PlayerBody, Tuning) {
        let tuning = Tuning::default();
        (PlayerBody::new(&tuning), tuning)
    }

    #[test]
    fn test_flap_from_rest() {
        let (mut player, tuning) = body();
        assert_eq!(player.vel.y, 0.0);

        player.apply_flap(&tuning);
        assert_eq!(player.vel.y, 10.0);

        let step = player.integrate(0.1, &tuning);
        assert_eq!(step, PlayerStep::Airborne);
        assert!((player.vel.y - 7.0).abs() < 1e-5);
    }

    #[test]
    fn test_flap_is_not_additive() {
        let (mut player, tuning) = body();
        player.vel.y = 4.0;
        player.apply_flap(&tuning);
        player.apply_flap(&tuning);
        assert_eq!(player.vel.y, tuning.flap_strength);
    }

    #[test]
    fn test_ground_breach_snaps() {
        let (mut player, tuning) = body();
        player.pos.y = tuning.ground_level + player.half_height();
        player.vel.y = -1.0;

        let step = player.integrate(0.1, &tuning);
        assert_eq!(step, PlayerStep::GroundBreach);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.pos.y, tuning.ground_level + player.half_height());
        assert!((player.bounds.min.y - tuning.ground_level).abs() < 1e-5);
    }

    #[test]
    fn test_ceiling_bounce_is_soft() {
        let (mut player, tuning) = body();
        player.pos.y = tuning.ceiling - 0.2;
        player.apply_flap(&tuning);

        let step = player.integrate(0.05, &tuning);
        assert_eq!(step, PlayerStep::CeilingBounce);
        assert_eq!(player.pos.y, tuning.ceiling - player.half_height());
        assert_eq!(player.vel.y, tuning.ceiling_bounce_speed);
    }

    #[test]
    fn test_fall_speed_is_capped() {
        let (mut player, tuning) = body();
        player.pos.y = 9.0;
        for _ in 0..10 {
            player.integrate(0.09, &tuning);
        }
        assert!(player.vel.y >= -tuning.max_fall_speed);
    }

    #[test]
    fn test_steering_accelerates_and_caps() {
        let (mut player, tuning) = body();
        player.set_horizontal_intent(false, true);
        player.integrate(0.05, &tuning);
        assert!((player.vel.x - 2.0).abs() < 1e-5);
        assert!(player.pos.x > 0.0);

        for _ in 0..40 {
            player.vel.y = 0.0;
            player.integrate(0.05, &tuning);
        }
        assert_eq!(player.vel.x, tuning.max_horizontal_speed);
        assert_eq!(player.pos.x, tuning.horizontal_bounds);
    }

    #[test]
    fn test_drag_and_snap_when_released() {
        let (mut player, tuning) = body();
        player.vel.x = 5.0;
        player.integrate(1.0 / 60.0, &tuning);
        assert!((player.vel.x - 5.0 * 0.92).abs() < 1e-4);

        for _ in 0..200 {
            player.vel.y = 0.0;
            player.integrate(1.0 / 60.0, &tuning);
        }
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_reversing_applies_drag() {
        let (mut player, tuning) = body();
        player.vel.x = 6.0;
        player.set_horizontal_intent(true, false);
        let dt = 1.0 / 60.0;
        player.integrate(dt, &tuning);
        let expected = (6.0 - 40.0 * dt) * frame_decay(0.92, dt);
        assert!((player.vel.x - expected).abs() < 1e-4);
    }

    #[test]
    fn test_both_keys_cancel() {
        let (mut player, tuning) = body();
        player.set_horizontal_intent(true, true);
        player.integrate(0.05, &tuning);
        assert_eq!(player.vel.x, 0.0);
    }

    #[test]
    fn test_bounds_follow_position() {
        let (mut player, tuning) = body();
        player.set_horizontal_intent(true, false);
        player.apply_flap(&tuning);
        for _ in 0..5 {
            player.integrate(0.03, &tuning);
            assert!(player.bounds.center().abs_diff_eq(player.pos, 1e-5));
            assert_eq!(player.pos.z, tuning.start_line);
        }
    }
}
