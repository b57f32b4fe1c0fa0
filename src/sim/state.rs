//! Game state and core simulation types
//!
//! Everything the simulation touches lives in [`GameState`], owned by the
//! caller and passed by `&mut` into each tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collectibles::CollectiblePool;
use super::collision::FatalCause;
use super::obstacles::ObstaclePool;
use super::player::PlayerBody;
use super::session::{RunSummary, Session, SessionPhase};
use crate::error::Result;
use crate::tuning::Tuning;

/// Something collaborators (audio, UI) may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// An obstacle pair was cleared
    Scored { points: u64 },
    /// A collectible was picked up
    Collected { points: u64 },
    /// The player flapped
    Flapped,
    /// The run ended
    GameOver {
        final_score: u64,
        new_high_score: bool,
        cause: FatalCause,
    },
}

/// Seconds since the current run started
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionClock {
    pub elapsed: f32,
}

impl SessionClock {
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub session: Session,
    pub clock: SessionClock,
    /// Gameplay ticks since the current run started
    pub time_ticks: u64,
    pub player: PlayerBody,
    pub obstacles: ObstaclePool,
    pub collectibles: CollectiblePool,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build the world once; pools are allocated here and only recycled afterwards
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = PlayerBody::new(&tuning);
        let obstacles = ObstaclePool::new(&mut rng, &tuning);
        let collectibles = CollectiblePool::new(&tuning);

        Self {
            tuning,
            seed,
            rng,
            session: Session::new(high_score),
            clock: SessionClock::default(),
            time_ticks: 0,
            player,
            obstacles,
            collectibles,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    /// Respawn the player and lay both pools out again
    pub fn reset_world(&mut self) {
        let tuning = &self.tuning;
        self.player.respawn(tuning);
        self.obstacles.reset(
            tuning.start_line + tuning.obstacle_start,
            tuning.obstacle_spacing,
            &mut self.rng,
            tuning,
        );
        self.collectibles.reset(&mut self.rng, tuning);
        self.clock.restart();
        self.time_ticks = 0;
    }

    /// Start (or restart) a run
    pub fn start_run(&mut self) -> Result<()> {
        self.session.begin()?;
        self.reset_world();
        log::info!("Run started (seed {}, high score {})", self.seed, self.session.high_score);
        Ok(())
    }

    /// End the current run. Does nothing unless a run is active.
    pub fn end_run(&mut self, cause: FatalCause) -> Option<RunSummary> {
        if !self.session.is_running() {
            return None;
        }
        let summary = self.session.finish().ok()?;
        log::info!(
            "Game over ({:?}): score {}, high score {}",
            cause,
            summary.final_score,
            summary.high_score
        );
        self.events.push(GameEvent::GameOver {
            final_score: summary.final_score,
            new_high_score: summary.new_high_score,
            cause,
        });
        Some(summary)
    }

    /// Flap, if a run is active
    pub fn flap(&mut self) -> bool {
        if !self.session.is_running() {
            return false;
        }
        self.player.apply_flap(&self.tuning);
        self.events.push(GameEvent::Flapped);
        true
    }

    /// Update held steering keys, if a run is active
    pub fn steer(&mut self, left: bool, right: bool) {
        if self.session.is_running() {
            self.player.set_horizontal_intent(left, right);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_ignored_until_running() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        assert!(!state.flap());
        state.steer(true, false);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(!state.player.intent.left);
        assert!(state.events.is_empty());

        state.start_run().unwrap();
        assert!(state.flap());
        assert_eq!(state.player.vel.y, state.tuning.flap_strength);
        assert_eq!(state.drain_events(), vec![GameEvent::Flapped]);
    }

    #[test]
    fn test_restart_resets_world() {
        let mut state = GameState::new(5, Tuning::default(), 0);
        state.start_run().unwrap();
        state.player.pos.y = -3.0;
        state.player.vel.x = 4.0;
        state.session.score = 9;
        state.obstacles.pairs[0].z = -10.0;
        state.obstacles.pairs[0].passed = true;
        state.collectibles.items[2].active = false;

        let summary = state.end_run(FatalCause::Ground).unwrap();
        assert_eq!(summary.final_score, 9);
        assert!(summary.new_high_score);

        state.start_run().unwrap();
        assert_eq!(state.score(), 0);
        assert_eq!(state.session.high_score, 9);
        assert_eq!(state.player.pos.y, state.tuning.spawn_height);
        assert_eq!(state.player.vel.x, 0.0);
        assert_eq!(state.obstacles.pairs[0].z, 40.0);
        assert!(!state.obstacles.pairs[0].passed);
        assert_eq!(state.collectibles.active_count(), state.collectibles.capacity());
    }

    #[test]
    fn test_end_run_only_once() {
        let mut state = GameState::new(5, Tuning::default(), 0);
        assert!(state.end_run(FatalCause::Ground).is_none());
        state.start_run().unwrap();
        assert!(state.end_run(FatalCause::Ground).is_some());
        assert!(state.end_run(FatalCause::Ground).is_none());
        let game_overs = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }
}
