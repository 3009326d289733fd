//! Score stores the leaderboard client can sit on
//!
//! Stores are blocking; the client moves every call onto tokio's blocking
//! pool, so implementations are free to do file or network I/O.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use super::entry::{HighScoreEntry, rank};
use super::error::LeaderboardError;

/// A table of `(name, score)` rows
pub trait ScoreStore: Send + Sync + 'static {
    /// Up to `limit` rows, highest score first
    fn fetch_top(&self, limit: usize) -> Result<Vec<HighScoreEntry>, LeaderboardError>;

    /// Insert a single row
    fn insert(&self, entry: &HighScoreEntry) -> Result<(), LeaderboardError>;
}

/// In-process store, used for tests and as a scratch board
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<HighScoreEntry>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<HighScoreEntry>) -> Self {
        Self {
            rows: Mutex::new(rows),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every call fail with [`LeaderboardError::Unavailable`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<HighScoreEntry>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_online(&self) -> Result<(), LeaderboardError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(LeaderboardError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl ScoreStore for MemoryStore {
    fn fetch_top(&self, limit: usize) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        self.check_online()?;
        Ok(rank(self.rows().clone(), limit))
    }

    fn insert(&self, entry: &HighScoreEntry) -> Result<(), LeaderboardError> {
        self.check_online()?;
        self.rows().push(entry.clone());
        Ok(())
    }
}

/// Rows kept as a JSON array in a local file
///
/// A missing file is an empty board. The file is created, along with its
/// parent directories, on the first insert. Every write goes to a temporary
/// file beside the board and is renamed over it, so the board on disk is
/// always either the old rows or the new ones.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Held across each read and each read-modify-write cycle
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&json)?)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_rows(&self, rows: &[HighScoreEntry]) -> Result<(), LeaderboardError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, rows)?;
        file.flush()?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(io::Error::from)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn fetch_top(&self, limit: usize) -> Result<Vec<HighScoreEntry>, LeaderboardError> {
        let _guard = self.lock();
        Ok(rank(self.read_rows()?, limit))
    }

    fn insert(&self, entry: &HighScoreEntry) -> Result<(), LeaderboardError> {
        let _guard = self.lock();

        let mut rows = self.read_rows()?;
        rows.push(entry.clone());
        self.write_rows(&rows)
    }
}
