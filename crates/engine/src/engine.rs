//! Engine state and the two transitions that mutate it
//!
//! [`Engine::apply_tick`] advances one scheduled tick; [`Engine::apply_order`]
//! settles one user order. Both run on the caller's single thread of
//! control, so every mutation of market, liquidity, ledger and round clock
//! is serialized by construction.

use fairground_core::{
    Fill, Ledger, LiquidityState, MarketState, NewsEvent, NewsMarker, PlayMode, Price,
    PriceHistory, Regime, Shares, Side, TICKER, Timestamp, TradeMarker, MAX_POS, news_catalog,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::price::{self, RevertBoost};
use crate::schedule::RoundClock;

/// Per-tick probability of toggling the volatility regime
const REGIME_FLIP_P: f64 = 0.004;

/// Engine configuration for one round
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Play mode fixing duration, cadence, pauses and scoring
    pub mode: PlayMode,
    /// Quoted bid/ask spread the fill price pays through
    pub spread: Price,
    /// Starting fair value (mid opens here too)
    pub initial_fair: Price,
    /// Starting cash balance
    pub initial_cash: Price,
    /// Rng seed; None draws from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::Unassisted,
            spread: 0.10,
            initial_fair: 100.0,
            initial_cash: fairground_core::INITIAL_CASH,
            seed: None,
        }
    }
}

/// Outcome of one scheduled tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The round advanced; a news event may have fired on this tick
    Advanced { news: Option<NewsFired> },
    /// The round is frozen for a news pause; nothing advanced
    Paused,
    /// Remaining time reached zero; the caller should finalize
    Expired,
}

/// A news firing, as observed by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewsFired {
    /// Marker keyed by the tick of the sample appended alongside it
    pub marker: NewsMarker,
    /// The catalog entry that fired
    pub event: NewsEvent,
}

/// Read-only view of engine state, published once per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub ticker: &'static str,
    pub tick: u64,
    pub mid: Price,
    pub fair: Price,
    pub regime: Regime,
    pub available_depth: f64,
    pub cash: Price,
    pub reserve: Price,
    pub position: Shares,
    pub avg_price: Option<Price>,
    pub remaining_ms: i64,
    pub paused: bool,
}

/// The market & trading engine for one round
///
/// Single-writer: exactly one controller invokes [`apply_tick`] and
/// [`apply_order`], sequentially.
///
/// [`apply_tick`]: Engine::apply_tick
/// [`apply_order`]: Engine::apply_order
pub struct Engine {
    config: EngineConfig,
    market: MarketState,
    liquidity: LiquidityState,
    ledger: Ledger,
    round: RoundClock,
    history: PriceHistory,
    trade_markers: Vec<TradeMarker>,
    news_markers: Vec<NewsMarker>,
    boost: RevertBoost,
    tick: u64,
    last_advance: Timestamp,
    rng: StdRng,
}

impl Engine {
    /// Start a round at `start` under the given configuration
    pub fn new(config: EngineConfig, start: Timestamp) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let market = MarketState::new(config.initial_fair);
        let mut history = PriceHistory::new();
        history.push(0, market.mid);

        info!(
            "Round started: mode {:?}, {}s, fair {}",
            config.mode,
            config.mode.duration_secs(),
            config.initial_fair
        );

        Self {
            round: RoundClock::new(start, config.mode.duration_secs()),
            ledger: Ledger::new(config.initial_cash),
            liquidity: LiquidityState::new(),
            market,
            history,
            trade_markers: Vec::new(),
            news_markers: Vec::new(),
            boost: RevertBoost::inactive(),
            tick: 0,
            last_advance: start,
            config,
            rng,
        }
    }

    /// Advance one scheduled tick at `now`
    ///
    /// Advances the price process, replenishes liquidity, evaluates a
    /// regime flip, checks the news timetable and appends a history
    /// sample. While paused or expired, no state advances.
    pub fn apply_tick(&mut self, now: Timestamp) -> TickOutcome {
        if self.round.is_expired(now) {
            return TickOutcome::Expired;
        }
        if self.round.is_paused(now) {
            // Paused time never counts toward liquidity replenishment
            self.last_advance = now;
            return TickOutcome::Paused;
        }

        let elapsed_ms = (now - self.last_advance).num_milliseconds();
        self.last_advance = now;

        self.market.mid = price::next_mid(&self.market, &mut self.boost, &mut self.rng);
        self.liquidity.replenish(elapsed_ms);

        if self.rng.gen_bool(REGIME_FLIP_P) {
            self.market.regime = self.market.regime.flipped();
            debug!("Regime flipped to {:?}", self.market.regime);
        }

        self.tick += 1;

        let news = if self.round.news_due(now) {
            Some(self.fire_news(now))
        } else {
            None
        };

        self.history.push(self.tick, self.market.mid);

        TickOutcome::Advanced { news }
    }

    /// Select and apply one catalog entry; arm a pause in assisted mode
    fn fire_news(&mut self, now: Timestamp) -> NewsFired {
        let catalog = news_catalog();
        let event = catalog[self.rng.gen_range(0..catalog.len())];

        self.market.shock_fair(event.fair_value_pct);
        self.round.advance_schedule();

        let marker = NewsMarker { tick: self.tick };
        self.news_markers.push(marker);

        if let Some(pause_ms) = self.config.mode.pause_ms() {
            self.round.begin_pause(now, pause_ms);
        }

        info!(
            "News: {} ({:+.0}% fair) -> fair {:.2}",
            event.headline,
            event.fair_value_pct * 100.0,
            self.market.fair
        );

        NewsFired { marker, event }
    }

    /// Settle a user order of `requested` shares at `now`
    ///
    /// The fill consumes liquidity, moves the mid by the impact function,
    /// settles against the ledger and appends a tick-stamped history
    /// sample and trade marker. Rejections leave all state untouched.
    pub fn apply_order(&mut self, now: Timestamp, side: Side, requested: Shares) -> Result<Fill> {
        if self.round.is_expired(now) {
            return Err(EngineError::RoundOver);
        }
        if self.round.is_paused(now) {
            return Err(EngineError::RoundPaused);
        }

        let qty = self.ledger.clamp_quantity(side, requested.max(1));
        if qty == 0 {
            return Err(EngineError::PositionLimit { max: MAX_POS });
        }

        let start_mid = self.market.mid;
        let impact = side.sign() as f64 * self.liquidity.impact_magnitude(qty);
        let end_mid = (start_mid + impact).max(1.0);

        // Fill pays through half the spread and meets the post-impact
        // midpoint halfway
        let half_spread = self.config.spread / 2.0;
        let through_spread = match side {
            Side::Buy => start_mid + half_spread,
            Side::Sell => start_mid - half_spread,
        };
        let vwap = through_spread + 0.5 * (end_mid - start_mid);

        let fill = self.ledger.settle(side, qty, vwap);

        self.market.mid = end_mid;
        self.liquidity.consume(qty);

        self.tick += 1;
        self.history.push(self.tick, end_mid);
        self.trade_markers.push(TradeMarker {
            tick: self.tick,
            price: end_mid,
            side,
        });

        if let Some(boost) = RevertBoost::arm(qty, self.market.fair, end_mid) {
            self.boost = boost;
        }

        debug!(
            "{:?} {} @ {:.4} (impact {:+.4}, depth {:.0})",
            side, qty, vwap, impact, self.liquidity.available_depth
        );

        Ok(fill)
    }

    /// Force expiry; the next tick observes the round as over
    pub fn end_round(&mut self, now: Timestamp) {
        self.round.end_now(now);
        info!("Round ended early by operator");
    }

    /// Snapshot the externally visible state at `now`
    pub fn snapshot(&self, now: Timestamp) -> EngineSnapshot {
        EngineSnapshot {
            ticker: TICKER,
            tick: self.tick,
            mid: self.market.mid,
            fair: self.market.fair,
            regime: self.market.regime,
            available_depth: self.liquidity.available_depth,
            cash: self.ledger.cash,
            reserve: self.ledger.reserve,
            position: self.ledger.position,
            avg_price: self.ledger.avg_price,
            remaining_ms: self.round.remaining(now).num_milliseconds(),
            paused: self.round.is_paused(now),
        }
    }

    /// Liquidation value at the current mid
    pub fn final_total(&self) -> Price {
        self.ledger.mark_to_market(self.market.mid)
    }

    /// Liquidation value minus starting cash
    pub fn final_pnl(&self) -> Price {
        self.final_total() - self.config.initial_cash
    }

    /// Market state (mid, fair, regime)
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    /// Cash/reserve/position ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Bounded price history, oldest first
    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Markers for every executed order, in tick order
    pub fn trade_markers(&self) -> &[TradeMarker] {
        &self.trade_markers
    }

    /// Markers for every fired news event, in tick order
    pub fn news_markers(&self) -> &[NewsMarker] {
        &self.news_markers
    }

    /// Round clock (schedule, pauses, expiry)
    pub fn round(&self) -> &RoundClock {
        &self.round
    }

    /// Engine configuration for this round
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current tick counter
    pub fn tick(&self) -> u64 {
        self.tick
    }
}
