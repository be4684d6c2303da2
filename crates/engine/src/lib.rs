//! Fairground Engine - market & trading core
//!
//! Owns everything with real invariants in a round:
//!
//! - **Price process**: diffusive noise, jump risk and mean reversion
//!   (with a revert boost after large orders), floored at 1
//! - **Liquidity**: depth consumption by fills, continuous replenishment,
//!   thin-book impact amplification
//! - **Settlement**: VWAP fills against the cash/reserve/position ledger
//! - **Schedule**: the 15-second news timetable, pause-based time dilation
//!   and round expiry
//!
//! The engine is deliberately passive: callers feed it timestamps
//! (`apply_tick`, `apply_order`) and it returns outcomes. All wall-clock
//! and task concerns live in the runner crate, which is the single writer
//! for an engine instance.

pub mod engine;
pub mod error;
pub mod price;
pub mod schedule;

pub use engine::{Engine, EngineConfig, EngineSnapshot, NewsFired, TickOutcome};
pub use error::{EngineError, Result};
pub use price::RevertBoost;
pub use schedule::RoundClock;
