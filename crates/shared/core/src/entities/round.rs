use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::values::{Price, Timestamp};

/// Play mode chosen at round start
///
/// The mode fixes the round duration, tick cadence, pause behavior on news
/// and whether the result is eligible for the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayMode {
    /// Competitive mode: 120s round, 10 Hz ticks, news never pauses,
    /// result is written to the leaderboard
    Unassisted,
    /// Practice mode: 90s round, 8 Hz ticks, each news firing freezes the
    /// round for 5s, result is not scored
    Assisted,
}

impl PlayMode {
    /// Round duration in seconds
    pub fn duration_secs(&self) -> i64 {
        match self {
            PlayMode::Unassisted => 120,
            PlayMode::Assisted => 90,
        }
    }

    /// Engine tick period in milliseconds
    pub fn tick_period_ms(&self) -> u64 {
        match self {
            PlayMode::Unassisted => 100,
            PlayMode::Assisted => 125,
        }
    }

    /// Clock freeze applied when a news event fires, if any
    pub fn pause_ms(&self) -> Option<i64> {
        match self {
            PlayMode::Unassisted => None,
            PlayMode::Assisted => Some(5000),
        }
    }

    /// Whether the terminal result is written to the leaderboard
    pub fn scoring_enabled(&self) -> bool {
        matches!(self, PlayMode::Unassisted)
    }
}

/// Terminal record of a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Unique round identifier
    pub round_id: Uuid,
    /// Trader display name
    pub player_name: String,
    /// cash + reserve + position * final mid
    pub final_total: Price,
    /// final_total minus starting cash
    pub final_pnl: Price,
    /// Mode the round was played in
    pub mode: PlayMode,
    /// When the round expired
    pub finished_at: Timestamp,
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Trader display name
    pub name: String,
    /// Round profit and loss
    pub pnl: Price,
    /// Round liquidation value
    pub total: Price,
    /// When the score was recorded
    pub timestamp: Timestamp,
}

impl From<&RoundResult> for ScoreEntry {
    fn from(result: &RoundResult) -> Self {
        Self {
            name: result.player_name.clone(),
            pnl: result.final_pnl,
            total: result.final_total,
            timestamp: result.finished_at,
        }
    }
}
