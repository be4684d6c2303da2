use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::entities::Side;
use crate::values::Price;

/// How many price samples the history ring retains
pub const HISTORY_CAP: usize = 700;

/// One point on the price chart: the mid after a given engine tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    /// Strictly increasing engine tick counter
    pub tick: u64,
    /// Mid price after that tick (or after that order's impact)
    pub mid: Price,
}

/// Marker for an executed order, keyed by the tick of its history sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeMarker {
    pub tick: u64,
    pub price: Price,
    pub side: Side,
}

/// Marker for a fired news event, keyed by the tick of its history sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsMarker {
    pub tick: u64,
}

/// Bounded, append-only ring of the most recent price samples
///
/// Oldest samples are dropped once the cap is reached. Samples are
/// strictly tick-ordered: one per tick, one per executed order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    samples: VecDeque<HistorySample>,
}

impl PriceHistory {
    /// Empty history
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    /// Append a sample, dropping the oldest on overflow
    pub fn push(&mut self, tick: u64, mid: Price) {
        if self.samples.len() == HISTORY_CAP {
            self.samples.pop_front();
        }
        self.samples.push_back(HistorySample { tick, mid });
    }

    /// Samples in tick order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    /// Most recent sample, if any
    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.back()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the ring is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
