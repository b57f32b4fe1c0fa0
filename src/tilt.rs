//! Cosmetic player tilt
//!
//! Rotation is Euler angles in radians: `z` noses the craft up and down, `y`
//! yaws it into a turn. Nothing in the simulation reads it.

use std::f32::consts::PI;

use glam::Vec3;

use crate::settings::Settings;

/// Drives the player's visual rotation from flaps and velocity
pub trait TiltAnimator {
    fn on_flap(&mut self);
    /// Advance by `dt`; `running` is false once the run is over
    fn update(&mut self, dt: f32, vel: Vec3, running: bool);
    fn rotation(&self) -> Vec3;
    fn reset(&mut self);
}

/// Pick the animator for the player's motion preference
pub fn animator_for(settings: &Settings) -> Box<dyn TiltAnimator> {
    if settings.reduced_motion {
        Box::new(SimpleTilt::default())
    } else {
        Box::new(EasedTilt::default())
    }
}

/// Instant tilt with no easing
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleTilt {
    rotation: Vec3,
}

impl TiltAnimator for SimpleTilt {
    fn on_flap(&mut self) {
        self.rotation.z = PI / 6.0;
    }

    fn update(&mut self, _dt: f32, vel: Vec3, running: bool) {
        if !running {
            return;
        }
        self.rotation.z = if vel.y < -1.0 { -PI / 8.0 } else { 0.0 };
        self.rotation.y = vel.x * -0.05;
    }

    fn rotation(&self) -> Vec3 {
        self.rotation
    }

    fn reset(&mut self) {
        self.rotation = Vec3::ZERO;
    }
}

/// Flap tween phases
#[derive(Debug, Clone, Copy, PartialEq)]
enum Tween {
    Idle,
    /// Nose up after a flap
    Rising { from: f32, elapsed: f32 },
    /// Slow nose-down once the rise finishes
    Diving { from: f32, elapsed: f32 },
}

/// Eased flap tweens, smooth-follow otherwise
#[derive(Debug, Clone, Copy)]
pub struct EasedTilt {
    rotation: Vec3,
    tween: Tween,
}

impl Default for EasedTilt {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            tween: Tween::Idle,
        }
    }
}

impl EasedTilt {
    const RISE_ANGLE: f32 = PI / 4.0;
    const RISE_DURATION: f32 = 0.15;
    const DIVE_ANGLE: f32 = -PI / 6.0;
    const DIVE_DURATION: f32 = 0.5;
    /// Fraction of the remaining distance closed per update when following
    const FOLLOW_RATE: f32 = 0.1;

    pub fn is_tweening(&self) -> bool {
        self.tween != Tween::Idle
    }

    fn ease_out(t: f32) -> f32 {
        1.0 - (1.0 - t) * (1.0 - t)
    }

    fn ease_in(t: f32) -> f32 {
        t * t
    }

    fn step_tween(&mut self, dt: f32, running: bool) {
        match self.tween {
            Tween::Idle => {}
            Tween::Rising { from, elapsed } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / Self::RISE_DURATION).min(1.0);
                self.rotation.z = from + (Self::RISE_ANGLE - from) * Self::ease_out(t);
                self.tween = if t < 1.0 {
                    Tween::Rising { from, elapsed }
                } else if running {
                    Tween::Diving {
                        from: self.rotation.z,
                        elapsed: 0.0,
                    }
                } else {
                    Tween::Idle
                };
            }
            Tween::Diving { from, elapsed } => {
                let elapsed = elapsed + dt;
                let t = (elapsed / Self::DIVE_DURATION).min(1.0);
                self.rotation.z = from + (Self::DIVE_ANGLE - from) * Self::ease_in(t);
                self.tween = if t < 1.0 {
                    Tween::Diving { from, elapsed }
                } else {
                    Tween::Idle
                };
            }
        }
    }
}

impl TiltAnimator for EasedTilt {
    fn on_flap(&mut self) {
        self.tween = Tween::Rising {
            from: self.rotation.z,
            elapsed: 0.0,
        };
    }

    fn update(&mut self, dt: f32, vel: Vec3, running: bool) {
        if self.is_tweening() {
            self.step_tween(dt, running);
            return;
        }
        if !running {
            return;
        }
        let target_z = (vel.y * 0.05).clamp(-PI / 6.0, PI / 8.0);
        let target_y = vel.x * -0.1;
        self.rotation.z += (target_z - self.rotation.z) * Self::FOLLOW_RATE;
        self.rotation.y += (target_y - self.rotation.y) * Self::FOLLOW_RATE;
    }

    fn rotation(&self) -> Vec3 {
        self.rotation
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_simple_tilt() {
        let mut tilt = SimpleTilt::default();
        tilt.update(DT, Vec3::new(2.0, -3.0, 0.0), true);
        assert_eq!(tilt.rotation().z, -PI / 8.0);
        assert!((tilt.rotation().y + 0.1).abs() < 1e-6);

        tilt.update(DT, Vec3::new(0.0, -0.5, 0.0), true);
        assert_eq!(tilt.rotation().z, 0.0);

        tilt.on_flap();
        assert_eq!(tilt.rotation().z, PI / 6.0);
    }

    #[test]
    fn test_flap_rises_then_dives() {
        let mut tilt = EasedTilt::default();
        tilt.on_flap();

        tilt.update(0.1, Vec3::ZERO, true);
        assert!(tilt.rotation().z > 0.0 && tilt.rotation().z < PI / 4.0);

        // Rise completes at 0.15s
        tilt.update(0.06, Vec3::ZERO, true);
        assert!((tilt.rotation().z - PI / 4.0).abs() < 1e-4);
        assert!(tilt.is_tweening());

        // Dive completes after a further 0.5s
        tilt.update(0.25, Vec3::ZERO, true);
        assert!(tilt.rotation().z < PI / 4.0 && tilt.rotation().z > -PI / 6.0);
        tilt.update(0.25, Vec3::ZERO, true);
        assert!((tilt.rotation().z + PI / 6.0).abs() < 1e-4);
        assert!(!tilt.is_tweening());
    }

    #[test]
    fn test_rise_is_eased_out() {
        let mut tilt = EasedTilt::default();
        tilt.on_flap();
        tilt.update(0.075, Vec3::ZERO, true);
        // Halfway in time is three quarters of the way in angle
        assert!((tilt.rotation().z - 0.75 * PI / 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_dive_after_game_over() {
        let mut tilt = EasedTilt::default();
        tilt.on_flap();
        tilt.update(0.2, Vec3::ZERO, false);
        assert!(!tilt.is_tweening());
        assert!((tilt.rotation().z - PI / 4.0).abs() < 1e-4);

        // Follow is frozen once the run is over
        tilt.update(DT, Vec3::new(0.0, -15.0, 0.0), false);
        assert!((tilt.rotation().z - PI / 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_follow_converges_to_clamped_target() {
        let mut tilt = EasedTilt::default();
        for _ in 0..200 {
            tilt.update(DT, Vec3::new(4.0, -15.0, 0.0), true);
        }
        assert!((tilt.rotation().z + PI / 6.0).abs() < 1e-3);
        assert!((tilt.rotation().y + 0.4).abs() < 1e-3);
    }

    #[test]
    fn test_reduced_motion_picks_simple() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut tilt = animator_for(&settings);
        tilt.on_flap();
        assert_eq!(tilt.rotation().z, PI / 6.0);
        tilt.reset();
        assert_eq!(tilt.rotation(), Vec3::ZERO);
    }
}
