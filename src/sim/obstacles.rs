//! Obstacle-pair pool
//!
//! A fixed number of top/bottom obstacle pairs stream toward the player. When
//! a pair falls far enough behind, the same slot is moved back to the front of
//! the corridor with a fresh gap and sway instead of being reallocated.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{
    FatalCause, Scorer, TickOutcome, crossed_player, hits_obstacle, in_collision_gate,
};
use super::player::PlayerBody;
use crate::tuning::Tuning;

/// Sinusoidal lateral sway of a pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sway {
    pub amplitude: f32,
    /// Radians per second
    pub frequency: f32,
    pub phase: f32,
}

impl Sway {
    pub fn random<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        Self {
            amplitude: rng.random::<f32>() * tuning.max_oscillation,
            frequency: rng.random_range(tuning.min_oscillation_freq..tuning.max_oscillation_freq),
            phase: rng.random::<f32>() * TAU,
        }
    }

    /// Lateral offset at `time` seconds into the run
    #[inline]
    pub fn offset(&self, time: f32) -> f32 {
        (time * self.frequency + self.phase).sin() * self.amplitude
    }
}

/// One top/bottom obstacle pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Pool slot index (stable for the life of the pool)
    pub slot: usize,
    /// Travel-axis coordinate of both halves
    pub z: f32,
    /// Current sway offset on x
    pub lateral: f32,
    /// Vertical midpoint of the opening
    pub gap_center: f32,
    /// Centers of the two halves, derived from `gap_center`
    pub top: Vec3,
    pub bottom: Vec3,
    pub top_bounds: Aabb,
    pub bottom_bounds: Aabb,
    /// Player has crossed this pair since it was last placed
    pub passed: bool,
    pub sway: Sway,
}

impl ObstaclePair {
    fn new(slot: usize) -> Self {
        Self {
            slot,
            z: 0.0,
            lateral: 0.0,
            gap_center: 0.0,
            top: Vec3::ZERO,
            bottom: Vec3::ZERO,
            top_bounds: Aabb::default(),
            bottom_bounds: Aabb::default(),
            passed: false,
            sway: Sway::default(),
        }
    }

    /// Place the pair at `z` with a fresh gap and sway
    pub fn respawn<R: Rng>(&mut self, z: f32, rng: &mut R, tuning: &Tuning) {
        self.sway = Sway::random(rng, tuning);
        self.gap_center = rng.random_range(tuning.min_gap_center..tuning.max_gap_center);
        self.z = z;
        self.lateral = 0.0;
        self.passed = false;
        self.refresh(tuning);
    }

    /// Recompute both halves and their boxes from `z`, `lateral` and `gap_center`
    pub fn refresh(&mut self, tuning: &Tuning) {
        let offset = tuning.obstacle_gap / 2.0 + tuning.obstacle_height / 2.0;
        self.top = Vec3::new(self.lateral, self.gap_center + offset, self.z);
        self.bottom = Vec3::new(self.lateral, self.gap_center - offset, self.z);

        let half = Self::half_extents(tuning);
        self.top_bounds = Aabb::from_center(self.top, half);
        self.bottom_bounds = Aabb::from_center(self.bottom, half);
    }

    pub fn half_extents(tuning: &Tuning) -> Vec3 {
        Vec3::new(
            tuning.obstacle_width / 2.0,
            tuning.obstacle_height / 2.0,
            tuning.obstacle_width / 2.0,
        )
    }
}

/// Fixed-size pool of obstacle pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    pub pairs: Vec<ObstaclePair>,
}

impl ObstaclePool {
    /// Allocate `tuning.obstacle_count` slots and lay them out
    pub fn new<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        let mut pool = Self {
            pairs: (0..tuning.obstacle_count).map(ObstaclePair::new).collect(),
        };
        pool.reset(
            tuning.start_line + tuning.obstacle_start,
            tuning.obstacle_spacing,
            rng,
            tuning,
        );
        pool
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Evenly space every slot from `start_z` with fresh gaps and sway
    pub fn reset<R: Rng>(&mut self, start_z: f32, spacing: f32, rng: &mut R, tuning: &Tuning) {
        for (i, pair) in self.pairs.iter_mut().enumerate() {
            pair.respawn(start_z + i as f32 * spacing, rng, tuning);
        }
    }

    /// Farthest travel coordinate among all slots except `skip`, never behind
    /// the start line
    pub fn farthest_except(&self, skip: usize, start_line: f32) -> f32 {
        self.pairs
            .iter()
            .filter(|p| p.slot != skip)
            .fold(start_line, |max_z, p| max_z.max(p.z))
    }

    /// Advance every pair, test collisions, award clearances and recycle
    ///
    /// Stops at the first pair the player hits.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        time: f32,
        player: &PlayerBody,
        tuning: &Tuning,
        rng: &mut R,
        scorer: &mut Scorer,
    ) -> TickOutcome {
        let step = tuning.forward_speed * dt;
        let gate = tuning.collision_gate();
        let recycle_line = tuning.start_line - tuning.obstacle_spacing * tuning.recycle_spacings;

        for i in 0..self.pairs.len() {
            let pair = &mut self.pairs[i];
            pair.z -= step;
            pair.lateral = pair.sway.offset(time);
            pair.refresh(tuning);

            if in_collision_gate(pair.z, player.pos.z, gate)
                && hits_obstacle(&player.bounds, pair)
            {
                log::info!("Hit obstacle {} at z={:.2}", i, pair.z);
                return TickOutcome::Fatal(FatalCause::Obstacle { slot: i });
            }

            if !pair.passed && crossed_player(pair.z, player.pos.z) {
                pair.passed = true;
                scorer.obstacle_cleared(i, tuning.obstacle_score);
            }

            if pair.z < recycle_line {
                let target = self.farthest_except(i, tuning.start_line) + tuning.obstacle_spacing;
                self.pairs[i].respawn(target, rng, tuning);
                log::debug!("Recycled obstacle {} to z={:.2}", i, target);
            }
        }

        TickOutcome::Continue
    }
}
