//! High-score leaderboard
//!
//! Provides:
//! - qualification and name rules for new scores (entry module)
//! - the `ScoreStore` boundary with REST, JSON-file and in-memory stores
//! - an async client that owns the cached board

pub mod client;
pub mod config;
pub mod entry;
pub mod error;
pub mod rest;
pub mod store;

pub use client::{LeaderboardClient, LeaderboardUpdate};
pub use config::LeaderboardConfig;
pub use entry::{DEFAULT_LIMIT, HighScoreEntry, MAX_NAME_LEN, is_qualifying, sanitize_name};
pub use error::LeaderboardError;
pub use rest::RestStore;
pub use store::{JsonFileStore, MemoryStore, ScoreStore};
