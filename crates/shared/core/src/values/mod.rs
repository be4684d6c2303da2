use chrono::{DateTime, Utc};

/// Price value - IEEE double, matching the stochastic process arithmetic
/// Future: could become a newtype with validation (positive, tick size)
pub type Price = f64;

/// Signed share count - positive long, negative short
pub type Shares = i64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// The single synthetic instrument traded in a round
pub const TICKER: &str = "SPX";

/// Hard cap on absolute position size (shares)
pub const MAX_POS: Shares = 1000;

/// Starting cash balance for every round
pub const INITIAL_CASH: Price = 100_000.0;
