//! Persisted high score
//!
//! A single best score, read at startup and written whenever it increases.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{KeyValueStore, load_json, save_json};

/// Best score ever reached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScore {
    pub best: u64,
    /// Completed runs
    pub runs: u64,
}

impl HighScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "sky_runner_highscore";

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true if it became the new best.
    pub fn submit(&mut self, score: u64) -> bool {
        self.runs = self.runs.saturating_add(1);
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load from storage; missing or unreadable records start at zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<HighScore>(store, Self::STORAGE_KEY) {
            Ok(Some(record)) => {
                log::info!("Loaded high score {}", record.best);
                record
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("High score saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_submit_only_increases() {
        let mut hs = HighScore::default();
        assert!(!hs.submit(0));
        assert!(hs.submit(7));
        assert!(!hs.submit(7));
        assert!(!hs.submit(3));
        assert_eq!(hs.best, 7);
        assert_eq!(hs.runs, 4);
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store), HighScore::default());

        HighScore { best: 31, runs: 4 }.save(&mut store).unwrap();
        let loaded = HighScore::load(&store);
        assert_eq!(loaded.best, 31);
        assert_eq!(loaded.runs, 4);
    }

    #[test]
    fn test_corrupt_record_falls_back_to_zero() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "not json").unwrap();
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_old_record_without_runs() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, r#"{"best":12}"#).unwrap();
        assert_eq!(HighScore::load(&store), HighScore { best: 12, runs: 0 });
    }
}
