//! Render-facing view of the world
//!
//! Everything a host needs to draw one frame, in world units. Serialized to
//! JSON for the web binding.

use glam::Vec3;
use serde::Serialize;

use crate::camera::FollowCamera;
use crate::error::Result;
use crate::sim::{Aabb, GameState, SessionPhase};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub position: Vec3,
    /// Cosmetic tilt (Euler radians)
    pub rotation: Vec3,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub top: Aabb,
    pub bottom: Aabb,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectibleView {
    pub position: Vec3,
    pub rotation: Vec3,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub high_score: u64,
    /// Seconds into the current run
    pub elapsed: f32,
    pub player: PlayerView,
    pub camera: FollowCamera,
    /// One entry per pool slot
    pub obstacles: Vec<ObstacleView>,
    pub collectibles: Vec<CollectibleView>,
}

impl WorldSnapshot {
    pub fn capture(state: &GameState, tilt: Vec3, camera: &FollowCamera) -> Self {
        Self {
            phase: state.phase(),
            score: state.score(),
            high_score: state.session.high_score,
            elapsed: state.clock.elapsed,
            player: PlayerView {
                position: state.player.pos,
                rotation: tilt,
                bounds: state.player.bounds,
            },
            camera: *camera,
            obstacles: state
                .obstacles
                .pairs
                .iter()
                .map(|p| ObstacleView {
                    top: p.top_bounds,
                    bottom: p.bottom_bounds,
                    passed: p.passed,
                })
                .collect(),
            collectibles: state
                .collectibles
                .items
                .iter()
                .map(|c| CollectibleView {
                    position: c.pos,
                    rotation: c.rotation,
                    active: c.active,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_covers_every_slot() {
        let mut state = GameState::new(8, Tuning::default(), 3);
        state.start_run().unwrap();
        let cam = FollowCamera::new(state.player.pos);
        let snap = WorldSnapshot::capture(&state, Vec3::ZERO, &cam);

        assert_eq!(snap.phase, SessionPhase::Running);
        assert_eq!(snap.high_score, 3);
        assert_eq!(snap.obstacles.len(), state.tuning.obstacle_count);
        assert_eq!(snap.collectibles.len(), state.tuning.collectible_count);
        assert_eq!(snap.player.position, state.player.pos);
    }

    #[test]
    fn test_json_shape() {
        let state = GameState::new(8, Tuning::default(), 0);
        let snap = WorldSnapshot::capture(&state, Vec3::ZERO, &FollowCamera::default());
        let value: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();

        assert_eq!(value["phase"], "Ready");
        assert_eq!(value["score"], 0);
        assert!(value["obstacles"].as_array().is_some());
        assert_eq!(value["player"]["position"].as_array().map(Vec::len), Some(3));
    }
}
