//! Persisted local state
//!
//! Everything survives restarts as key→JSON documents in the data
//! directory, one file per key, versioned like the original web app's
//! localStorage keys. Every read tolerates a missing or corrupt file by
//! falling back to documented defaults; malformed configuration is never
//! surfaced as a user-facing error.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod settings;
pub mod stats;
pub mod student;

pub use settings::TeacherSettings;
pub use stats::GlobalStats;
pub use student::StudentProfile;

const DEVICE_ID_KEY: &str = "device_id_v1";
const THEME_KEY: &str = "theme_v1";

/// Resolve the data directory: a project-local `.bopodrill` wins, then
/// `~/.bopodrill`.
pub fn data_dir() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let local = cwd.join(".bopodrill");
    if local.exists() {
        return Ok(local);
    }

    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
    Ok(home.join(".bopodrill"))
}

/// Create the data directory and seed defaults for anything missing.
pub fn init(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    settings::save(dir, &settings::load(dir))?;
    stats::save(dir, &stats::load(dir))?;
    student::save(dir, &student::load(dir))?;
    device_id(dir)?;
    info!("bopodrill initialized at {:?}", dir);
    Ok(())
}

/// Read a JSON document, falling back to `default` on any failure.
pub(crate) fn load_json<T: DeserializeOwned>(dir: &Path, key: &str, default: T) -> T {
    let path = dir.join(format!("{}.json", key));
    match std::fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("corrupt {} ({}), using defaults", key, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Write a JSON document under `key`.
pub(crate) fn save_json<T: Serialize>(dir: &Path, key: &str, value: &T) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", key));
    std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// The stable device identifier: generated once, persisted, reused.
pub fn device_id(dir: &Path) -> Result<String> {
    let path = dir.join(DEVICE_ID_KEY);
    if let Ok(existing) = std::fs::read_to_string(&path) {
        let existing = existing.trim();
        if !existing.is_empty() {
            return Ok(existing.to_string());
        }
    }

    let id = uuid::Uuid::new_v4().to_string();
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, &id)?;
    Ok(id)
}

/// Display theme preference. Theming itself is out of scope; only the
/// persisted key lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

pub fn load_theme(dir: &Path) -> Theme {
    load_json(dir, THEME_KEY, Theme::default())
}

pub fn save_theme(dir: &Path, theme: Theme) -> Result<()> {
    save_json(dir, THEME_KEY, &theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_device_id_is_stable() {
        let dir = TempDir::new().unwrap();
        let first = device_id(dir.path()).unwrap();
        let second = device_id(dir.path()).unwrap();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_load_json_falls_back_on_corrupt_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        let value: u32 = load_json(dir.path(), "broken", 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_theme_roundtrip() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_theme(dir.path()), Theme::Light);
        save_theme(dir.path(), Theme::Dark).unwrap();
        assert_eq!(load_theme(dir.path()), Theme::Dark);
    }
}
