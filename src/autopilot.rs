//! Scripted pilot for headless runs
//!
//! Aims for the gap of the nearest pair still ahead and drifts toward the
//! nearest collectible. Good enough to exercise the simulation, not to win.

use crate::sim::GameState;

/// Inputs for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PilotInput {
    pub flap: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Flap once this far below the target height
    pub flap_margin: f32,
    /// Ignore lateral offsets smaller than this
    pub steer_deadzone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            flap_margin: 0.4,
            steer_deadzone: 0.3,
        }
    }
}

impl Autopilot {
    /// Height to hold: the nearest upcoming gap, or spawn height if none
    fn target_height(state: &GameState) -> f32 {
        let player_z = state.player.pos.z;
        state
            .obstacles
            .pairs
            .iter()
            .filter(|p| !p.passed && p.z > player_z)
            .min_by(|a, b| a.z.total_cmp(&b.z))
            .map_or(state.tuning.spawn_height, |p| p.gap_center)
    }

    fn target_lateral(state: &GameState) -> Option<f32> {
        let player_z = state.player.pos.z;
        state
            .collectibles
            .items
            .iter()
            .filter(|c| c.active && c.pos.z > player_z)
            .min_by(|a, b| a.pos.z.total_cmp(&b.pos.z))
            .map(|c| c.pos.x)
    }

    pub fn decide(&self, state: &GameState) -> PilotInput {
        let player = &state.player;
        let target_y = Self::target_height(state);
        let flap = player.vel.y <= 0.0 && player.pos.y < target_y - self.flap_margin;

        let offset = Self::target_lateral(state).map_or(0.0, |x| x - player.pos.x);
        PilotInput {
            flap,
            left: offset < -self.steer_deadzone,
            right: offset > self.steer_deadzone,
        }
    }
}
