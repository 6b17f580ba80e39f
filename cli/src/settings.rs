use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dailysweep_core::{BLAST_STEP_MS, Difficulty, Placement};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_FILE: &str = "dailysweep.toml";
pub const DEFAULT_STATS_FILE: &str = "dailysweep-stats.json";

/// `~/.dailysweep/dailysweep-stats.json`, or the bare file name when there is
/// no home directory.
pub fn default_stats_path() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".dailysweep").join(DEFAULT_STATS_FILE),
        None => {
            log::warn!("Could not determine home directory, keeping stats in the working directory");
            PathBuf::from(DEFAULT_STATS_FILE)
        }
    }
}

/// Optional TOML file; every key falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub placement: Placement,
    pub stats_path: PathBuf,
    pub blast_step_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Beginner,
            placement: Placement::default(),
            stats_path: default_stats_path(),
            blast_step_ms: BLAST_STEP_MS,
        }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid settings")
    }

    /// Reads `path`, or the default file when present, or falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_SETTINGS_FILE), false),
        };

        if !required && !path.exists() {
            log::debug!("No settings file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        let settings = Self::from_toml(&text)
            .with_context(|| format!("Could not load {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn keys_override_defaults() {
        let settings = Settings::from_toml(
            r#"
            difficulty = "expert"
            placement = "adaptive"
            blast_step_ms = 150
            "#,
        )
        .unwrap();

        assert_eq!(settings.difficulty, Difficulty::Expert);
        assert_eq!(settings.placement, Placement::Adaptive);
        assert_eq!(settings.blast_step_ms, 150);
        assert_eq!(settings.stats_path, default_stats_path());
    }

    #[test]
    fn default_stats_path_is_not_relative_to_cwd() {
        let path = default_stats_path();

        assert!(path.ends_with(DEFAULT_STATS_FILE));
        if dirs::home_dir().is_some() {
            assert!(path.is_absolute());
            assert!(path.ends_with(Path::new(".dailysweep").join(DEFAULT_STATS_FILE)));
        }
    }

    #[test]
    fn stats_path_can_be_overridden() {
        let settings = Settings::from_toml(r#"stats_path = "/tmp/sweep/stats.json""#).unwrap();
        assert_eq!(settings.stats_path, PathBuf::from("/tmp/sweep/stats.json"));
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        assert!(Settings::from_toml(r#"difficulty = "nightmare""#).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/dailysweep.toml"))).is_err());
    }
}
