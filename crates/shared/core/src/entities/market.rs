use serde::{Deserialize, Serialize};

use crate::values::Price;

/// Volatility regime governing the noise magnitude of the price process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// Quiet market - baseline noise
    Calm,
    /// Stressed market - doubled noise
    Volatile,
}

impl Regime {
    /// Per-tick diffusive noise scale, as a fraction of fair value
    pub fn sigma(&self) -> f64 {
        match self {
            Regime::Calm => 0.0015,
            Regime::Volatile => 0.0030,
        }
    }

    /// Returns the other regime
    pub fn flipped(&self) -> Self {
        match self {
            Regime::Calm => Regime::Volatile,
            Regime::Volatile => Regime::Calm,
        }
    }
}

/// Observable market state for the single synthetic instrument
///
/// `mid` is the tradable reference price; `fair` is the anchor the mid
/// mean-reverts toward, moved discretely by macro news.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    /// Current tradable price (always >= 1)
    pub mid: Price,

    /// Fair-value anchor (always >= 1)
    pub fair: Price,

    /// Current volatility regime
    pub regime: Regime,
}

impl MarketState {
    /// Create a market with mid anchored at fair value
    pub fn new(fair: Price) -> Self {
        Self {
            mid: fair,
            fair,
            regime: Regime::Calm,
        }
    }

    /// Apply a discrete fair-value shock of `pct` (e.g. +0.10 for +10%)
    ///
    /// The result is floored at 1 so news can never drive the anchor to
    /// zero or below.
    pub fn shock_fair(&mut self, pct: f64) {
        self.fair = (self.fair * (1.0 + pct)).max(1.0);
    }

    /// Distance from mid to fair (positive when mid trades below fair)
    pub fn deviation(&self) -> f64 {
        self.fair - self.mid
    }
}
