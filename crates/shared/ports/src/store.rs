use fairground_core::ScoreEntry;
use thiserror::Error;

/// Errors from leaderboard persistence
///
/// Storage failures are never fatal to a round: callers degrade to an
/// empty leaderboard on read failure and drop the write on write failure.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt leaderboard data: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Port for leaderboard persistence
///
/// The stored list is ordered, pnl-descending, and capped by the caller;
/// the store itself only reads and writes the whole list.
pub trait ScoreStore: Send + Sync {
    /// Load the stored leaderboard
    fn load(&self) -> StoreResult<Vec<ScoreEntry>>;

    /// Replace the stored leaderboard
    fn save(&self, entries: &[ScoreEntry]) -> StoreResult<()>;
}
