//! Collision and scoring evaluation
//!
//! The pools call into this module while they advance; it decides what counts
//! as a hit and turns clearances and pickups into score and events.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::obstacles::ObstaclePair;
use super::state::GameEvent;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalCause {
    /// Player touched the ground
    Ground,
    /// Player hit an obstacle pair (pool slot index)
    Obstacle { slot: usize },
    /// The tick failed internally and the world can no longer be trusted
    Fault,
}

/// Result of a sub-update; `Fatal` short-circuits the rest of the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickOutcome {
    #[default]
    Continue,
    Fatal(FatalCause),
}

impl TickOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, TickOutcome::Fatal(_))
    }
}

/// Obstacles are only tested while their travel coordinate is within `gate`
/// of the player's.
///
/// This is a narrow-phase shortcut for a small pool. It holds as long as one
/// frame of travel is shorter than the gate, which `Tuning::validate` enforces.
#[inline]
pub fn in_collision_gate(obstacle_z: f32, player_z: f32, gate: f32) -> bool {
    (obstacle_z - player_z).abs() < gate
}

/// Does the player's box touch either half of the pair?
pub fn hits_obstacle(player: &Aabb, pair: &ObstaclePair) -> bool {
    player.intersects(&pair.top_bounds) || player.intersects(&pair.bottom_bounds)
}

/// Has the obstacle moved behind the player line?
#[inline]
pub fn crossed_player(obstacle_z: f32, player_z: f32) -> bool {
    obstacle_z < player_z
}

/// Score sink handed to the pools during a tick
pub struct Scorer<'a> {
    score: &'a mut u64,
    events: &'a mut Vec<GameEvent>,
}

impl<'a> Scorer<'a> {
    pub fn new(score: &'a mut u64, events: &'a mut Vec<GameEvent>) -> Self {
        Self { score, events }
    }

    pub fn score(&self) -> u64 {
        *self.score
    }

    /// An obstacle pair crossed the player line
    pub fn obstacle_cleared(&mut self, slot: usize, points: u64) {
        *self.score = self.score.saturating_add(points);
        log::debug!("Obstacle {} cleared, score {}", slot, self.score);
        self.events.push(GameEvent::Scored { points });
    }

    /// A collectible was picked up
    pub fn collected(&mut self, slot: usize, points: u64) {
        *self.score = self.score.saturating_add(points);
        log::debug!("Collectible {} picked up, score {}", slot, self.score);
        self.events.push(GameEvent::Collected { points });
    }
}
