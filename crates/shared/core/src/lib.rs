//! Fairground Core Domain
//!
//! Pure domain types for the Fairground market simulation.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Market state & stochastic regime
    MarketState,
    Regime,
    // Liquidity & price impact
    BASE_DEPTH,
    DEPTH_FLOOR,
    LiquidityState,
    // Position/cash accounting
    Fill,
    Ledger,
    Side,
    // Price history & chart markers
    HISTORY_CAP,
    HistorySample,
    NewsMarker,
    PriceHistory,
    TradeMarker,
    // News catalog
    NewsEvent,
    news_catalog,
    // Round lifecycle
    PlayMode,
    RoundResult,
    ScoreEntry,
};
pub use values::{INITIAL_CASH, MAX_POS, Price, Shares, TICKER, Timestamp};
