//! Stochastic mid-price process
//!
//! Per tick the mid moves by the sum of three terms: uniform diffusive
//! noise scaled by the regime's sigma, a rare signed jump, and mean
//! reversion toward fair value. The combined step is clamped and the
//! result floored at 1.

use fairground_core::{MarketState, Price, Shares};
use rand::Rng;

/// Probability of a jump on any given tick
const JUMP_P: f64 = 0.001;

/// Jump magnitude band, as a fraction of fair value
const JUMP_MIN: f64 = 0.003;
const JUMP_MAX: f64 = 0.010;

/// Mean-reversion rate per second of simulated time
const BETA_PER_SEC: f64 = 0.35;

/// Reference tick cadence the per-tick beta is derived from
const TICKS_PER_SEC: f64 = 10.0;

/// Hard bound on the combined per-tick step
const STEP_CLAMP: f64 = 0.12;

/// Orders at or above this size arm the revert boost
const BOOST_QTY: Shares = 500;

/// Ticks a freshly armed boost stays active
const BOOST_TICKS: u8 = 5;

/// Multiplicative decay applied each tick the boost is consumed
const BOOST_DECAY: f64 = 0.6;

/// Temporary mean-reversion amplification armed by large orders
///
/// A big fill knocks the mid away from fair; the boost models the market
/// pulling it back faster than the baseline reversion would.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevertBoost {
    strength: f64,
    ticks_left: u8,
}

impl RevertBoost {
    /// A boost that contributes nothing
    pub fn inactive() -> Self {
        Self {
            strength: 0.0,
            ticks_left: 0,
        }
    }

    /// Arm a boost for an order of `qty` shares filled out to `post_trade_mid`
    ///
    /// Returns `None` for orders below the size threshold.
    pub fn arm(qty: Shares, fair: Price, post_trade_mid: Price) -> Option<Self> {
        if qty < BOOST_QTY {
            return None;
        }
        let deviation = (fair - post_trade_mid).abs();
        Some(Self {
            strength: 0.08 * (qty as f64 / 1000.0) * deviation,
            ticks_left: BOOST_TICKS,
        })
    }

    /// Whether the boost still has ticks to contribute
    pub fn is_active(&self) -> bool {
        self.ticks_left > 0
    }

    /// Drift contribution for a tick at deviation `d = fair - mid`
    ///
    /// Consuming a tick decays the strength and burns one tick of life.
    fn consume(&mut self, deviation: f64) -> f64 {
        if self.ticks_left == 0 {
            return 0.0;
        }
        let extra = self.strength * deviation.signum() * (deviation.abs() / 0.5).min(1.0);
        self.strength *= BOOST_DECAY;
        self.ticks_left -= 1;
        extra
    }
}

impl Default for RevertBoost {
    fn default() -> Self {
        Self::inactive()
    }
}

/// Produce the next mid price for one tick
///
/// Pure aside from the rng draws: reads `market`, consumes one tick of
/// `boost`, and returns the new mid without mutating market state.
pub fn next_mid<R: Rng>(market: &MarketState, boost: &mut RevertBoost, rng: &mut R) -> Price {
    // Diffusive noise
    let noise = rng.gen_range(-1.0..=1.0) * market.regime.sigma() * market.fair;

    // Jump risk
    let jump = if rng.gen_bool(JUMP_P) {
        let magnitude = market.fair * rng.gen_range(JUMP_MIN..=JUMP_MAX);
        if rng.gen_bool(0.5) { magnitude } else { -magnitude }
    } else {
        0.0
    };

    // Mean reversion toward fair, stronger the further away (saturating)
    let deviation = market.deviation();
    let base_factor = (deviation.abs() / 10.0).clamp(0.0, 1.0);
    let beta_tick = BETA_PER_SEC / TICKS_PER_SEC;
    let mut drift = beta_tick * deviation * base_factor;
    drift += boost.consume(deviation);

    let step = (noise + jump + drift).clamp(-STEP_CLAMP, STEP_CLAMP);
    (market.mid + step).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairground_core::Regime;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn market(mid: f64, fair: f64) -> MarketState {
        MarketState {
            mid,
            fair,
            regime: Regime::Calm,
        }
    }

    #[test]
    fn test_mid_never_drops_below_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut boost = RevertBoost::inactive();
        let mut state = market(1.0, 1.0);

        for _ in 0..10_000 {
            state.mid = next_mid(&state, &mut boost, &mut rng);
            assert!(state.mid >= 1.0);
        }
    }

    #[test]
    fn test_step_is_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut boost = RevertBoost::inactive();
        // Huge displacement so the raw drift would exceed the clamp
        let state = market(50.0, 100.0);

        for _ in 0..1000 {
            let next = next_mid(&state, &mut boost, &mut rng);
            assert!((next - state.mid).abs() <= STEP_CLAMP + 1e-12);
        }
    }

    #[test]
    fn test_reversion_pulls_mid_toward_fair() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut boost = RevertBoost::inactive();
        let mut state = market(95.0, 100.0);

        // Warm up, then the drift term must keep the mid near fair on
        // average even though single ticks wander
        for _ in 0..300 {
            state.mid = next_mid(&state, &mut boost, &mut rng);
        }
        let mut total_dev = 0.0;
        for _ in 0..300 {
            state.mid = next_mid(&state, &mut boost, &mut rng);
            total_dev += (state.fair - state.mid).abs();
        }
        assert!(total_dev / 300.0 < 2.5);
    }

    #[test]
    fn test_boost_arms_only_for_large_orders() {
        assert!(RevertBoost::arm(499, 100.0, 99.0).is_none());
        let boost = RevertBoost::arm(500, 100.0, 99.0).unwrap();
        assert!(boost.is_active());
        assert!((boost.strength - 0.08 * 0.5 * 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_boost_decays_and_expires() {
        let mut boost = RevertBoost::arm(1000, 100.0, 98.0).unwrap();
        let initial_strength = boost.strength;

        let first = boost.consume(2.0);
        assert!(first > 0.0);
        assert!((boost.strength - initial_strength * BOOST_DECAY).abs() < 1e-12);

        for _ in 0..4 {
            boost.consume(2.0);
        }
        assert!(!boost.is_active());
        assert_eq!(boost.consume(2.0), 0.0);
    }

    #[test]
    fn test_boost_sign_follows_deviation() {
        let mut boost = RevertBoost::arm(1000, 100.0, 102.0).unwrap();
        // Mid above fair: boost must push down
        assert!(boost.consume(-2.0) < 0.0);
    }

    #[test]
    fn test_volatile_regime_widens_dispersion() {
        let sample_abs_steps = |regime: Regime, seed: u64| -> f64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut boost = RevertBoost::inactive();
            let state = MarketState {
                mid: 100.0,
                fair: 100.0,
                regime,
            };
            (0..2000)
                .map(|_| (next_mid(&state, &mut boost, &mut rng) - state.mid).abs())
                .sum()
        };

        let calm = sample_abs_steps(Regime::Calm, 11);
        let volatile = sample_abs_steps(Regime::Volatile, 11);
        // The step clamp compresses the ratio, but the volatile regime
        // must still move strictly more than calm on the same draws
        assert!(volatile > 1.2 * calm);
    }
}
