//! Leaderboard client holding the cached top scores
//!
//! The cache belongs to the client, never to a game session. Background work
//! (refreshes and submissions) runs on spawned tasks that report back through
//! a channel; the owner drains it with [`LeaderboardClient::next_update`] and
//! hands each report to [`LeaderboardClient::apply`], so the cache is only ever
//! written from the owner's loop, one update at a time.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::entry::{HighScoreEntry, is_qualifying, rank, sanitize_name};
use super::error::LeaderboardError;
use super::store::ScoreStore;

/// Report from a background leaderboard task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardUpdate {
    /// A score was stored
    Submitted(HighScoreEntry),
    /// Fresh board contents; empty if the fetch failed
    Refreshed(Vec<HighScoreEntry>),
}

pub struct LeaderboardClient {
    store: Arc<dyn ScoreStore>,
    limit: usize,
    cache: Vec<HighScoreEntry>,
    updates_tx: UnboundedSender<LeaderboardUpdate>,
    updates_rx: UnboundedReceiver<LeaderboardUpdate>,
}

impl LeaderboardClient {
    pub fn new(store: Arc<dyn ScoreStore>, limit: usize) -> Self {
        let (updates_tx, updates_rx) = unbounded_channel();
        Self {
            store,
            limit,
            cache: Vec::new(),
            updates_tx,
            updates_rx,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Cached board, highest score first
    pub fn cached(&self) -> &[HighScoreEntry] {
        &self.cache
    }

    /// Fetch the board and replace the cache with it
    ///
    /// Fails soft: any error is logged and leaves the cache empty.
    pub async fn fetch_top_scores(&mut self) -> &[HighScoreEntry] {
        self.cache = fetch_or_empty(Arc::clone(&self.store), self.limit).await;
        &self.cache
    }

    /// Whether `score` would earn a place on the cached board
    pub fn is_qualifying(&self, score: u32) -> bool {
        is_qualifying(score, &self.cache, self.limit)
    }

    /// Refresh the cache without waiting; the result arrives as an update
    pub fn refresh_in_background(&self) {
        let store = Arc::clone(&self.store);
        let limit = self.limit;
        let updates = self.updates_tx.clone();

        tokio::spawn(async move {
            let scores = fetch_or_empty(store, limit).await;
            let _ = updates.send(LeaderboardUpdate::Refreshed(scores));
        });
    }

    /// Submit a score without waiting
    ///
    /// Returns `false`, and sends nothing, when the name is blank. On success
    /// a `Submitted` update is followed by a `Refreshed` one. A failed insert
    /// is logged and dropped without retry.
    pub fn submit_score(&self, name: &str, score: u32) -> bool {
        let Some(name) = sanitize_name(name) else {
            return false;
        };

        let entry = HighScoreEntry::new(name, score);
        let store = Arc::clone(&self.store);
        let limit = self.limit;
        let updates = self.updates_tx.clone();

        tokio::spawn(async move {
            if let Err(err) = insert(Arc::clone(&store), entry.clone()).await {
                warn!("Failed to save high score {} for {}: {}", entry.score, entry.name, err);
                return;
            }

            info!("Saved high score {} for {}", entry.score, entry.name);
            let _ = updates.send(LeaderboardUpdate::Submitted(entry));

            let scores = fetch_or_empty(store, limit).await;
            let _ = updates.send(LeaderboardUpdate::Refreshed(scores));
        });

        true
    }

    /// Wait for the next report from a background task
    pub async fn next_update(&mut self) -> Option<LeaderboardUpdate> {
        self.updates_rx.recv().await
    }

    /// Fold a background report into the cache
    pub fn apply(&mut self, update: &LeaderboardUpdate) {
        if let LeaderboardUpdate::Refreshed(scores) = update {
            self.cache = scores.clone();
        }
    }
}

async fn fetch_or_empty(store: Arc<dyn ScoreStore>, limit: usize) -> Vec<HighScoreEntry> {
    match fetch(store, limit).await {
        Ok(scores) => scores,
        Err(err) => {
            warn!("Failed to load high scores: {}", err);
            Vec::new()
        }
    }
}

async fn fetch(
    store: Arc<dyn ScoreStore>,
    limit: usize,
) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
    let rows = tokio::task::spawn_blocking(move || store.fetch_top(limit)).await??;
    Ok(rank(rows, limit))
}

async fn insert(store: Arc<dyn ScoreStore>, entry: HighScoreEntry) -> Result<(), LeaderboardError> {
    tokio::task::spawn_blocking(move || store.insert(&entry)).await?
}
