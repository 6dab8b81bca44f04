//! Teacher settings
//!
//! Loose on disk, strict in memory: whatever is read gets clamped into
//! valid ranges and unknown symbols are dropped, so a hand-edited or
//! corrupt settings file can never wedge the drill.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::catalog;
use crate::checkpoint::MasteryThresholds;

const SETTINGS_KEY: &str = "settings_v3";

/// Teacher-configured drill parameters. Field names mirror the wire
/// format of the result payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherSettings {
    /// Questions per level before it may be evaluated, 1..=100.
    pub required_questions: u32,
    /// Accuracy percent required to pass a level, 1..=100.
    pub required_accuracy: u32,
    /// Ordered symbol pool; doubles as the checkpoint level list.
    pub enabled_symbols: Vec<String>,
    /// Speak the target symbol when a question opens.
    pub auto_speak_on_question: bool,
    /// Freeze the choice buttons after a pick until the next question.
    pub lock_after_pick: bool,
    /// Where the clearance summary is POSTed; `None` skips delivery.
    pub result_endpoint: Option<String>,
}

impl Default for TeacherSettings {
    fn default() -> Self {
        TeacherSettings {
            required_questions: 10,
            required_accuracy: 80,
            enabled_symbols: catalog::all_symbols(),
            auto_speak_on_question: true,
            lock_after_pick: true,
            result_endpoint: None,
        }
    }
}

impl TeacherSettings {
    /// Clamp thresholds and restrict symbols to the catalog, de-duplicated
    /// in order. An empty (or fully invalid) selection re-enables the
    /// whole catalog.
    pub fn validated(mut self) -> Self {
        self.required_questions = self.required_questions.clamp(1, 100);
        self.required_accuracy = self.required_accuracy.clamp(1, 100);

        let mut seen = HashSet::new();
        self.enabled_symbols
            .retain(|s| catalog::contains(s) && seen.insert(s.clone()));
        if self.enabled_symbols.is_empty() {
            self.enabled_symbols = catalog::all_symbols();
        }
        self
    }

    pub fn thresholds(&self) -> MasteryThresholds {
        MasteryThresholds::clamped(self.required_questions, self.required_accuracy)
    }

    /// Effective endpoint: the `BOPODRILL_ENDPOINT` env var overrides the
    /// stored value.
    pub fn endpoint(&self) -> Option<String> {
        std::env::var("BOPODRILL_ENDPOINT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.result_endpoint.clone())
    }
}

pub fn load(dir: &Path) -> TeacherSettings {
    super::load_json(dir, SETTINGS_KEY, TeacherSettings::default()).validated()
}

pub fn save(dir: &Path, settings: &TeacherSettings) -> Result<()> {
    super::save_json(dir, SETTINGS_KEY, settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let s = TeacherSettings::default();
        assert_eq!(s.required_questions, 10);
        assert_eq!(s.required_accuracy, 80);
        assert_eq!(s.enabled_symbols.len(), 37);
        assert!(s.auto_speak_on_question);
        assert!(s.lock_after_pick);
        assert!(s.result_endpoint.is_none());
    }

    #[test]
    fn test_validation_clamps_and_filters() {
        let s = TeacherSettings {
            required_questions: 0,
            required_accuracy: 250,
            enabled_symbols: vec!["ㄅ".into(), "bogus".into(), "ㄅ".into(), "ㄆ".into()],
            ..TeacherSettings::default()
        }
        .validated();
        assert_eq!(s.required_questions, 1);
        assert_eq!(s.required_accuracy, 100);
        assert_eq!(s.enabled_symbols, vec!["ㄅ".to_string(), "ㄆ".to_string()]);
    }

    #[test]
    fn test_empty_selection_restores_full_catalog() {
        let s = TeacherSettings {
            enabled_symbols: vec!["nope".into()],
            ..TeacherSettings::default()
        }
        .validated();
        assert_eq!(s.enabled_symbols.len(), 37);
    }

    #[test]
    fn test_load_tolerates_missing_and_partial_files() {
        let dir = TempDir::new().unwrap();
        // Missing file: defaults
        assert_eq!(load(dir.path()), TeacherSettings::default());

        // Partial document: unspecified fields default, thresholds clamp
        std::fs::write(
            dir.path().join("settings_v3.json"),
            r#"{"requiredQuestions": 900}"#,
        )
        .unwrap();
        let s = load(dir.path());
        assert_eq!(s.required_questions, 100);
        assert_eq!(s.required_accuracy, 80);
        assert_eq!(s.enabled_symbols.len(), 37);
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let s = TeacherSettings {
            required_questions: 3,
            required_accuracy: 50,
            enabled_symbols: vec!["ㄅ".into(), "ㄆ".into(), "ㄇ".into(), "ㄈ".into()],
            auto_speak_on_question: false,
            lock_after_pick: false,
            result_endpoint: Some("https://example.invalid/collect".into()),
        };
        save(dir.path(), &s).unwrap();
        assert_eq!(load(dir.path()), s);
    }
}
