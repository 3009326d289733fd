//! Application configuration
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line flags. Missing keys fall back to defaults.

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::GameConfig;
use crate::leaderboard::LeaderboardConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub leaderboard: LeaderboardConfig,

    /// Size the grid to the terminal instead of `game.grid_width/height`
    pub fit_to_terminal: bool,

    /// File the log is written to; the terminal itself belongs to the UI
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            leaderboard: LeaderboardConfig::default(),
            fit_to_terminal: true,
            log_file: PathBuf::from("term_snake.log"),
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config in {:?}", path))
    }

    /// Validate every section, naming the first problem found
    pub fn validate(&self) -> Result<()> {
        self.game
            .validate()
            .and_then(|_| self.leaderboard.validate())
            .map_err(|msg| anyhow!("invalid configuration: {msg}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.fit_to_terminal);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(
            &path,
            r#"{
                "game": { "grid_width": 32, "grid_height": 18 },
                "leaderboard": { "url": "https://scores.example", "api_key": "k" },
                "fit_to_terminal": false,
                "log_level": "DEBUG"
            }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.game.grid_width, 32);
        assert_eq!(config.game.grid_height, 18);
        assert_eq!(config.game.tick_interval_ms, 100);
        assert_eq!(config.leaderboard.url.as_deref(), Some("https://scores.example"));
        assert_eq!(config.leaderboard.limit, 10);
        assert!(!config.fit_to_terminal);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(&dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_validate_reports_section_errors() {
        let mut config = AppConfig::default();
        config.leaderboard.limit = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("limit"));
    }
}
