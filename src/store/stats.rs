//! Cumulative local stats
//!
//! Accumulates only across passed levels; the checkpoint state machine
//! is the sole writer during a session.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const STATS_KEY: &str = "stats_v3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GlobalStats {
    pub correct: u64,
    pub total: u64,
}

impl GlobalStats {
    pub fn accuracy_percent(&self) -> u32 {
        if self.total > 0 {
            ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
        } else {
            0
        }
    }
}

pub fn load(dir: &Path) -> GlobalStats {
    super::load_json(dir, STATS_KEY, GlobalStats::default())
}

pub fn save(dir: &Path, stats: &GlobalStats) -> Result<()> {
    super::save_json(dir, STATS_KEY, stats)
}

pub fn reset(dir: &Path) -> Result<()> {
    save(dir, &GlobalStats::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_roundtrip_and_reset() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load(dir.path()), GlobalStats::default());

        save(dir.path(), &GlobalStats { correct: 9, total: 12 }).unwrap();
        assert_eq!(load(dir.path()), GlobalStats { correct: 9, total: 12 });

        reset(dir.path()).unwrap();
        assert_eq!(load(dir.path()), GlobalStats::default());
    }

    #[test]
    fn test_accuracy_percent() {
        assert_eq!(GlobalStats::default().accuracy_percent(), 0);
        assert_eq!(GlobalStats { correct: 2, total: 3 }.accuracy_percent(), 67);
    }
}
