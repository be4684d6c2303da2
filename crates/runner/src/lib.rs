//! Fairground Runner - round orchestration
//!
//! Drives one engine instance from start to expiry:
//!
//! - **Controller**: a single task owning the engine, ticking it on the
//!   mode's cadence and settling orders from a command mailbox - ticks and
//!   orders never interleave
//! - **Messages**: a broadcast stream renderers subscribe to (snapshots,
//!   trade/news markers, notices, the terminal result)
//! - **Leaderboard**: JSON-file persistence of the top-50 scores,
//!   pnl-descending; storage failures degrade to an empty board
//!
//! ```text
//!   RoundHandle ──orders/end──▶ ┌────────────────┐
//!                               │ RoundController │──▶ Engine (single writer)
//!   tokio interval ──ticks────▶ └────────┬───────┘
//!                                        │ broadcast
//!                          snapshots, trades, news, notices, result
//! ```

pub mod controller;
pub mod error;
pub mod leaderboard;
pub mod messages;

pub use controller::{RoundConfig, RoundController, RoundHandle};
pub use error::RoundError;
pub use leaderboard::{
    DEFAULT_LEADERBOARD_FILE, JsonFileStore, LEADERBOARD_CAP, MemoryStore, record_score,
};
pub use messages::RoundMessage;
