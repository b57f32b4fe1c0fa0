//! Simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - Seeded RNG only (reproducible runs)
//! - Pools are allocated once and recycled in place
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod collectibles;
pub mod collision;
pub mod obstacles;
pub mod player;
pub mod session;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collectibles::{Collectible, CollectiblePool, CollectibleTick};
pub use collision::{FatalCause, Scorer, TickOutcome};
pub use obstacles::{ObstaclePair, ObstaclePool, Sway};
pub use player::{PlayerBody, PlayerStep, SteerIntent};
pub use session::{RunSummary, Session, SessionPhase};
pub use state::{GameEvent, GameState, SessionClock};
pub use tick::tick;
