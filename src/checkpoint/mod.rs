//! Checkpoint state machine
//!
//! Drives mastery-gated progression through an ordered list of enabled
//! symbols ("levels"). Each level tracks attempts and correct answers
//! against two teacher-set thresholds: a minimum question count and a
//! minimum accuracy. Both comparisons are `>=`, so a level exactly at a
//! threshold passes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::store::stats::GlobalStats;

pub mod options;

pub use options::{pick_options, OPTION_COUNT};

/// Teacher-set pass thresholds for one level. Read-only to the session;
/// a fresh copy is installed only at level (re)start boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryThresholds {
    /// Minimum questions answered before a level may be evaluated, 1..=100.
    pub required_attempts: u32,
    /// Minimum rounded accuracy percent to pass, 1..=100.
    pub required_accuracy: u32,
}

impl MasteryThresholds {
    /// Clamp arbitrary (possibly corrupt) values into the valid range.
    pub fn clamped(required_attempts: u32, required_accuracy: u32) -> Self {
        MasteryThresholds {
            required_attempts: required_attempts.clamp(1, 100),
            required_accuracy: required_accuracy.clamp(1, 100),
        }
    }
}

impl Default for MasteryThresholds {
    fn default() -> Self {
        MasteryThresholds { required_attempts: 10, required_accuracy: 80 }
    }
}

/// Per-level counters; zeroed on every level (re)start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelProgress {
    pub symbol: String,
    pub attempts: u32,
    pub correct: u32,
}

impl LevelProgress {
    fn fresh(symbol: String) -> Self {
        LevelProgress { symbol, attempts: 0, correct: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Ready,
    InLevel,
    AllClear,
}

/// Why a session refused to start. The caller simply keeps the start
/// action disabled; these are not fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartError {
    #[error("no symbols are enabled for the checkpoint")]
    NoLevels,
    #[error("a student identifier is required before starting")]
    NoStudent,
}

/// Outcome of one `evaluate_level` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelOutcome {
    /// Level passed; the session advanced to `next_symbol`.
    Passed { next_symbol: String },
    /// Final level passed; the whole checkpoint is cleared.
    AllClear,
    /// Accuracy below threshold; same symbol, counters zeroed.
    Retry,
    /// Attempts gate unmet (or not in a level); nothing changed.
    NotReady,
}

/// One checkpoint run: ordered levels, a cursor, and the live progress
/// of the current level.
#[derive(Debug, Clone)]
pub struct CheckpointSession {
    levels: Vec<String>,
    level_index: usize,
    phase: Phase,
    progress: Option<LevelProgress>,
    thresholds: MasteryThresholds,
}

impl CheckpointSession {
    pub fn new() -> Self {
        CheckpointSession {
            levels: Vec::new(),
            level_index: 0,
            phase: Phase::Ready,
            progress: None,
            thresholds: MasteryThresholds::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn total_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn thresholds(&self) -> MasteryThresholds {
        self.thresholds
    }

    pub fn progress(&self) -> Option<&LevelProgress> {
        self.progress.as_ref()
    }

    /// Symbol of the current level, while one is active.
    pub fn current_symbol(&self) -> Option<&str> {
        self.progress.as_ref().map(|p| p.symbol.as_str())
    }

    /// Begin a run over `levels` with the given thresholds.
    ///
    /// Refused when no symbols are enabled or the student id is blank;
    /// the session stays in whatever state it was in.
    pub fn start(
        &mut self,
        levels: Vec<String>,
        thresholds: MasteryThresholds,
        student_id: &str,
    ) -> Result<(), StartError> {
        if levels.is_empty() {
            return Err(StartError::NoLevels);
        }
        if student_id.trim().is_empty() {
            return Err(StartError::NoStudent);
        }

        let first = levels[0].clone();
        self.levels = levels;
        self.level_index = 0;
        self.thresholds = thresholds;
        self.progress = Some(LevelProgress::fresh(first));
        self.phase = Phase::InLevel;
        info!(levels = self.levels.len(), "checkpoint started");
        Ok(())
    }

    /// Record one multiple-choice answer. Returns whether it was correct,
    /// or `None` outside of a level. Never transitions state.
    pub fn record_answer(&mut self, chosen: &str) -> Option<bool> {
        if self.phase != Phase::InLevel {
            return None;
        }
        let progress = self.progress.as_mut()?;
        let correct = chosen == progress.symbol;
        progress.attempts += 1;
        if correct {
            progress.correct += 1;
        }
        debug!(
            symbol = %progress.symbol,
            attempts = progress.attempts,
            correct = progress.correct,
            "answer recorded"
        );
        Some(correct)
    }

    /// Whether the attempts gate is satisfied and the level may be judged.
    pub fn can_evaluate(&self) -> bool {
        matches!(
            self.progress.as_ref(),
            Some(p) if self.phase == Phase::InLevel
                && p.attempts >= self.thresholds.required_attempts
        )
    }

    /// Rounded accuracy percent of the current level.
    pub fn level_accuracy(&self) -> u32 {
        self.progress
            .as_ref()
            .map(|p| percent(p.correct, p.attempts))
            .unwrap_or(0)
    }

    /// Judge the current level once the attempts gate is met.
    ///
    /// On pass the level's counters are folded into `stats` and the
    /// cursor advances; on fail the counters reset for the same symbol.
    /// `latest_thresholds` takes effect only at these (re)start
    /// boundaries, never mid-level.
    pub fn evaluate_level(
        &mut self,
        latest_thresholds: MasteryThresholds,
        stats: &mut GlobalStats,
    ) -> LevelOutcome {
        if !self.can_evaluate() {
            return LevelOutcome::NotReady;
        }
        let progress = match self.progress.take() {
            Some(p) => p,
            None => return LevelOutcome::NotReady,
        };

        let accuracy = percent(progress.correct, progress.attempts);
        if accuracy >= self.thresholds.required_accuracy {
            // Pass events are the only thing that feeds the global stats.
            stats.correct += progress.correct as u64;
            stats.total += progress.attempts as u64;
            self.level_index += 1;
            self.thresholds = latest_thresholds;

            if let Some(next) = self.levels.get(self.level_index).cloned() {
                info!(symbol = %progress.symbol, accuracy, next = %next, "level passed");
                self.progress = Some(LevelProgress::fresh(next.clone()));
                LevelOutcome::Passed { next_symbol: next }
            } else {
                info!(symbol = %progress.symbol, accuracy, "all levels cleared");
                self.phase = Phase::AllClear;
                LevelOutcome::AllClear
            }
        } else {
            info!(symbol = %progress.symbol, accuracy, "level failed, retrying");
            self.thresholds = latest_thresholds;
            self.progress = Some(LevelProgress::fresh(progress.symbol));
            LevelOutcome::Retry
        }
    }

    /// Return to `Ready` from any state, discarding all progress.
    pub fn restart(&mut self) {
        self.level_index = 0;
        self.progress = None;
        self.phase = Phase::Ready;
    }

    /// Four answer choices for the current question.
    pub fn question_options<R: Rng>(&self, rng: &mut R) -> Vec<String> {
        match self.current_symbol() {
            Some(answer) => pick_options(&self.levels, answer, rng),
            None => Vec::new(),
        }
    }
}

impl Default for CheckpointSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounded percentage, 0 when `total` is 0.
pub fn percent(correct: u32, total: u32) -> u32 {
    if total > 0 {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    }
}
