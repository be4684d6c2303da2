//! Leaderboard persistence and the sort/trim rule
//!
//! The board is a pnl-descending list capped at 50 entries. Reads that
//! fail yield an empty board and writes that fail are dropped - storage
//! trouble is never fatal to a round.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fairground_core::ScoreEntry;
use fairground_ports::{ScoreStore, StoreError, StoreResult};
use log::warn;

/// Maximum number of retained leaderboard entries
pub const LEADERBOARD_CAP: usize = 50;

/// Default leaderboard file name
pub const DEFAULT_LEADERBOARD_FILE: &str = "liquidity_fair_leaderboard.json";

/// Insert `entry`, re-sort pnl-descending, trim to the cap, persist
///
/// The sort is stable, so ties keep their insertion order within a run.
/// Returns the resulting board (also the one surfaced to the player when
/// the write fails).
pub fn record_score(store: &dyn ScoreStore, entry: ScoreEntry) -> Vec<ScoreEntry> {
    let mut board = store.load().unwrap_or_else(|e| {
        warn!("Leaderboard read failed, starting empty: {e}");
        Vec::new()
    });

    board.push(entry);
    board.sort_by(|a, b| b.pnl.partial_cmp(&a.pnl).unwrap_or(Ordering::Equal));
    board.truncate(LEADERBOARD_CAP);

    if let Err(e) = store.save(&board) {
        warn!("Leaderboard write failed, score dropped: {e}");
    }
    board
}

/// JSON-file score store
///
/// A missing file reads as an empty board; malformed contents surface as
/// [`StoreError::Corrupt`] and the caller degrades from there.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by DEFAULT_LEADERBOARD_FILE in `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_LEADERBOARD_FILE))
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<ScoreEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = std::fs::read(&self.path)?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    fn save(&self, entries: &[ScoreEntry]) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory score store for tests and headless embedding
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<ScoreEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stored board
    pub fn entries(&self) -> Vec<ScoreEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<ScoreEntry>> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".into()))
    }

    fn save(&self, entries: &[ScoreEntry]) -> StoreResult<()> {
        match self.entries.lock() {
            Ok(mut guard) => {
                *guard = entries.to_vec();
                Ok(())
            }
            Err(_) => Err(StoreError::Unavailable("store mutex poisoned".into())),
        }
    }
}
