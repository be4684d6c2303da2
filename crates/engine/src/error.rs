use fairground_core::Shares;
use thiserror::Error;

/// Engine-level failures
///
/// Every variant is recoverable: no state is mutated when an order is
/// rejected, the caller surfaces a transient notice and the round goes on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Position limit reached (±{max} sh)")]
    PositionLimit { max: Shares },

    #[error("Round is paused for news")]
    RoundPaused,

    #[error("Round has ended")]
    RoundOver,
}

pub type Result<T> = std::result::Result<T, EngineError>;
