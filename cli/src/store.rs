use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dailysweep_core::{GameOutcome, GameStats};

/// [`GameStats`] kept as JSON on disk.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    stats: GameStats,
}

impl StatsStore {
    /// Opens `path`; a missing file starts from empty stats.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let stats = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("Corrupt stats file {}", path.display()))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No stats at {}, starting fresh", path.display());
                GameStats::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Could not read {}", path.display()));
            }
        };
        Ok(Self { path, stats })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Records `outcome` and writes the file when it counted.
    pub fn record(&mut self, outcome: &GameOutcome) -> Result<bool> {
        if !self.stats.record(outcome) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Writes the stats as pretty JSON, creating missing parent directories.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.stats)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Could not write {}", self.path.display()))?;
        log::debug!("Saved stats to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dailysweep_core::Difficulty;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dailysweep-{}-{}.json", name, std::process::id()))
    }

    fn win(difficulty: Difficulty, time_elapsed: u32) -> GameOutcome {
        GameOutcome {
            won: true,
            time_elapsed,
            config: difficulty.config(),
            difficulty,
        }
    }

    #[test]
    fn missing_file_starts_empty() {
        let store = StatsStore::open(temp_path("missing")).unwrap();
        assert_eq!(store.stats(), &GameStats::default());
    }

    #[test]
    fn records_persist_across_opens() {
        let path = temp_path("persist");

        let mut store = StatsStore::open(&path).unwrap();
        assert!(store.record(&win(Difficulty::Expert, 120)).unwrap());
        assert!(!store.record(&win(Difficulty::Custom, 5)).unwrap());

        let reopened = StatsStore::open(&path).unwrap();
        assert_eq!(reopened.stats().games_won, 1);
        assert_eq!(reopened.stats().best_time(Difficulty::Expert), Some(120));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_creates_missing_directories() {
        let root = std::env::temp_dir().join(format!("dailysweep-nested-{}", std::process::id()));
        let path = root.join("a").join("b").join("stats.json");
        assert!(!root.exists());

        let mut store = StatsStore::open(&path).unwrap();
        assert!(store.record(&win(Difficulty::Beginner, 30)).unwrap());

        assert!(path.is_file());
        assert_eq!(StatsStore::open(&path).unwrap().stats().games_won, 1);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();

        assert!(StatsStore::open(&path).is_err());

        fs::remove_file(&path).unwrap();
    }
}
