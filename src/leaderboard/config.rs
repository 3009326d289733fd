use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::entry::DEFAULT_LIMIT;
use super::rest::RestStore;
use super::store::{JsonFileStore, ScoreStore};

/// Where high scores live and how many are shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Base URL of a hosted REST table service. When unset, scores are kept
    /// in `scores_file` instead.
    pub url: Option<String>,
    /// Public API key sent with every request
    pub api_key: Option<String>,
    /// Table holding `(name, score)` rows
    pub table: String,
    /// Number of scores on the board
    pub limit: usize,
    /// Local score file used without a URL
    pub scores_file: PathBuf,
    /// Per-request timeout for the REST store
    pub timeout_ms: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: "highscores".to_string(),
            limit: DEFAULT_LIMIT,
            scores_file: PathBuf::from("highscores.json"),
            timeout_ms: 5_000,
        }
    }
}

impl LeaderboardConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit == 0 {
            return Err("leaderboard limit must be at least 1".to_string());
        }

        if self.table.trim().is_empty() {
            return Err("leaderboard table name must not be empty".to_string());
        }

        if let Some(url) = &self.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(format!("leaderboard url must be http(s), got {url}"));
            }
        }

        if self.timeout_ms == 0 {
            return Err("leaderboard timeout_ms must be at least 1".to_string());
        }

        Ok(())
    }

    /// Build the store this configuration points at
    pub fn open_store(&self) -> Arc<dyn ScoreStore> {
        match &self.url {
            Some(_) => Arc::new(RestStore::from_config(self)),
            None => Arc::new(JsonFileStore::new(&self.scores_file)),
        }
    }

    /// Human readable name of the backing store, for logs and headers
    pub fn describe_store(&self) -> String {
        match &self.url {
            Some(url) => format!("{}/{}", url.trim_end_matches('/'), self.table),
            None => self.scores_file.display().to_string(),
        }
    }
}
