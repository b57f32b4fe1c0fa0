//! Collectible pool
//!
//! Slots are tagged active/inactive. Picked-up or missed items go inactive and
//! are brought back far ahead of the player, one per tick at most.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::Scorer;
use super::player::PlayerBody;
use crate::tuning::Tuning;

/// A spinning pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub slot: usize,
    pub pos: Vec3,
    /// Euler angles, cosmetic only
    pub rotation: Vec3,
    pub bounds: Aabb,
    pub active: bool,
}

impl Collectible {
    fn new(slot: usize) -> Self {
        Self {
            slot,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            bounds: Aabb::default(),
            active: false,
        }
    }

    /// Activate at travel coordinate `z` with random lateral/vertical jitter
    pub fn place<R: Rng>(&mut self, z: f32, rng: &mut R, tuning: &Tuning) {
        let width = tuning.horizontal_bounds * 2.0 * tuning.collectible_width_fill;
        let x = (rng.random::<f32>() - 0.5) * width;
        let y = tuning.collectible_height_center
            + (rng.random::<f32>() - 0.5) * tuning.collectible_height_spread;
        self.pos = Vec3::new(x, y, z);
        self.rotation = Vec3::new(
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
        );
        self.active = true;
        self.refresh(tuning);
    }

    pub fn refresh(&mut self, tuning: &Tuning) {
        self.bounds = Aabb::from_center(self.pos, Vec3::splat(tuning.collectible_size));
    }
}

/// What happened to the pool during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectibleTick {
    pub collected: u32,
    pub expired: u32,
    /// Slot brought back this tick, if any
    pub activated: Option<usize>,
}

/// Fixed-size pool of collectibles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectiblePool {
    pub items: Vec<Collectible>,
}

impl CollectiblePool {
    /// Allocate `tuning.collectible_count` slots, all inactive
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            items: (0..tuning.collectible_count).map(Collectible::new).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|c| c.active).count()
    }

    /// Stagger every slot ahead of the first obstacle, strictly increasing in z
    pub fn reset<R: Rng>(&mut self, rng: &mut R, tuning: &Tuning) {
        for item in &mut self.items {
            item.active = false;
        }
        let mut z = tuning.start_line + tuning.obstacle_start;
        for item in &mut self.items {
            z += tuning.collectible_distance * (1.0 + rng.random::<f32>());
            item.place(z, rng, tuning);
        }
    }

    /// Advance, spin, collect or expire every active item, then maybe spawn one
    pub fn tick<R: Rng>(
        &mut self,
        dt: f32,
        player: &PlayerBody,
        tuning: &Tuning,
        rng: &mut R,
        scorer: &mut Scorer,
    ) -> CollectibleTick {
        let step = tuning.forward_speed * dt;
        let spin = tuning.collectible_spin_speed * dt;
        let expire_line = player.pos.z - tuning.collectible_expire_behind;

        let mut report = CollectibleTick::default();
        let mut active = 0usize;
        let mut farthest: Option<f32> = None;

        for item in self.items.iter_mut().filter(|c| c.active) {
            item.pos.z -= step;
            item.rotation.y += spin;
            item.rotation.x += spin * 0.5;
            item.refresh(tuning);

            if item.bounds.intersects(&player.bounds) {
                item.active = false;
                report.collected += 1;
                scorer.collected(item.slot, tuning.collectible_score);
                continue;
            }

            if item.pos.z < expire_line {
                item.active = false;
                report.expired += 1;
                continue;
            }

            active += 1;
            farthest = Some(farthest.map_or(item.pos.z, |z| z.max(item.pos.z)));
        }

        report.activated = self.maybe_spawn(active, farthest, player, tuning, rng);
        report
    }

    /// Bring back one inactive slot when the leading item has drawn close enough
    fn maybe_spawn<R: Rng>(
        &mut self,
        active: usize,
        farthest: Option<f32>,
        player: &PlayerBody,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Option<usize> {
        if active >= self.capacity() {
            return None;
        }
        let slot = self.items.iter().position(|c| !c.active)?;

        let horizon = tuning.start_line + tuning.collectible_spawn_ahead;
        let trigger = farthest.unwrap_or(player.pos.z);
        if trigger >= horizon {
            return None;
        }

        let z = horizon + rng.random::<f32>() * tuning.collectible_distance;
        self.items[slot].place(z, rng, tuning);
        log::debug!("Spawned collectible {} at z={:.2}", slot, z);
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameEvent;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (CollectiblePool, PlayerBody, Tuning, Pcg32) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut pool = CollectiblePool::new(&tuning);
        pool.reset(&mut rng, &tuning);
        (pool, PlayerBody::new(&tuning), tuning, rng)
    }

    fn run_tick(
        pool: &mut CollectiblePool,
        player: &PlayerBody,
        tuning: &Tuning,
        rng: &mut Pcg32,
        dt: f32,
    ) -> (CollectibleTick, u64, Vec<GameEvent>) {
        let mut score = 0;
        let mut events = Vec::new();
        let mut scorer = Scorer::new(&mut score, &mut events);
        let report = pool.tick(dt, player, tuning, rng, &mut scorer);
        (report, score, events)
    }

    #[test]
    fn test_reset_staggers_ahead() {
        let (pool, _, tuning, _) = setup();
        assert_eq!(pool.active_count(), tuning.collectible_count);
        let mut last = tuning.start_line + tuning.obstacle_start;
        for item in &pool.items {
            assert!(item.pos.z > last);
            assert!(item.pos.z - last >= tuning.collectible_distance - 1e-3);
            assert!(item.pos.x.abs() <= tuning.horizontal_bounds * tuning.collectible_width_fill);
            last = item.pos.z;
        }
    }

    #[test]
    fn test_full_pool_never_spawns() {
        let (mut pool, player, tuning, mut rng) = setup();
        // Pull everything close so the spawn horizon condition holds
        for (i, item) in pool.items.iter_mut().enumerate() {
            item.pos.z = 10.0 + i as f32;
            item.pos.x = 4.0;
            item.pos.y = 9.0;
        }
        let (report, _, _) = run_tick(&mut pool, &player, &tuning, &mut rng, 0.01);
        assert_eq!(report.activated, None);
        assert_eq!(pool.active_count(), tuning.collectible_count);
    }

    #[test]
    fn test_pickup_scores_and_deactivates() {
        let (mut pool, player, tuning, mut rng) = setup();
        pool.items[0].pos = player.pos + Vec3::new(0.0, 0.0, 0.05);

        let (report, score, events) = run_tick(&mut pool, &player, &tuning, &mut rng, 0.01);
        assert_eq!(report.collected, 1);
        assert_eq!(score, tuning.collectible_score);
        assert_eq!(events, vec![GameEvent::Collected { points: 5 }]);
        // The freed slot is immediately eligible again but sits far ahead
        let item = &pool.items[0];
        if item.active {
            assert!(item.pos.z >= tuning.start_line + tuning.collectible_spawn_ahead);
        }
    }

    #[test]
    fn test_missed_item_expires_without_score() {
        let (mut pool, player, tuning, mut rng) = setup();
        let z = player.pos.z - tuning.collectible_expire_behind + 0.01;
        pool.items[0].pos = Vec3::new(4.0, 9.0, z);

        let (report, score, events) = run_tick(&mut pool, &player, &tuning, &mut rng, 0.01);
        assert_eq!(report.expired, 1);
        assert_eq!(score, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_spawn_one_per_tick_within_window() {
        let (mut pool, player, tuning, mut rng) = setup();
        for item in pool.items.iter_mut() {
            item.active = false;
        }

        let horizon = tuning.start_line + tuning.collectible_spawn_ahead;
        let (report, _, _) = run_tick(&mut pool, &player, &tuning, &mut rng, 0.01);
        assert_eq!(report.activated, Some(0));
        assert_eq!(pool.active_count(), 1);
        let z = pool.items[0].pos.z;
        assert!(z >= horizon && z < horizon + tuning.collectible_distance);

        // Leading item is beyond the horizon, so nothing else comes back yet
        pool.items[0].pos.z = horizon + 1.0;
        let (report, _, _) = run_tick(&mut pool, &player, &tuning, &mut rng, 0.01);
        assert_eq!(report.activated, None);
        assert_eq!(pool.active_count(), 1);
    }

    #[test]
    fn test_spin_is_tracked() {
        let (mut pool, player, tuning, mut rng) = setup();
        let before = pool.items[3].rotation;
        run_tick(&mut pool, &player, &tuning, &mut rng, 0.1);
        let after = pool.items[3].rotation;
        assert!((after.y - before.y - 0.2).abs() < 1e-5);
        assert!((after.x - before.x - 0.1).abs() < 1e-5);
    }
}
