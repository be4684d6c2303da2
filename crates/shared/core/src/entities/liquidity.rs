use serde::{Deserialize, Serialize};

use crate::values::{Price, Shares};

/// Full book depth when fully replenished (shares)
pub const BASE_DEPTH: f64 = 1000.0;

/// Depth never drains below this floor (shares)
pub const DEPTH_FLOOR: f64 = 50.0;

/// Impact paid by the first 100 shares of any order
const IMP_MIN: f64 = 0.005;

/// Impact ceiling for a full-size order against a full book
const IMP_MAX: f64 = 0.90;

/// Convexity of the impact ramp over the 900 shares past the allowance
const IMP_POW: f64 = 2.2;

/// Exponent coupling impact to book thinness
const LIQ_PWR: f64 = 0.5;

/// Fraction of base depth restored per second of elapsed time
const REPLENISH_PER_SEC: f64 = 0.05;

/// Available displayed depth and the impact it implies for incoming orders
///
/// Executed orders consume depth; depth recovers continuously between
/// trades. Thinner books amplify the impact of subsequent orders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityState {
    /// Currently available depth, clamped to [DEPTH_FLOOR, BASE_DEPTH]
    pub available_depth: f64,
}

impl LiquidityState {
    /// Start from a fully replenished book
    pub fn new() -> Self {
        Self {
            available_depth: BASE_DEPTH,
        }
    }

    /// Price displacement caused by executing `qty` shares at this depth
    ///
    /// The first 100 shares pay only the impact floor; the next 900 ramp
    /// via a power curve to the impact ceiling. The whole curve is scaled
    /// by how thin the book currently is.
    pub fn impact_magnitude(&self, qty: Shares) -> Price {
        let depth = self.available_depth.max(DEPTH_FLOOR);
        let past_allowance = ((qty - 100).max(0)) as f64;
        let x = past_allowance / 900.0;
        let curve = x.powf(IMP_POW);
        let thinness = (BASE_DEPTH / depth).powf(LIQ_PWR);
        (IMP_MIN + (IMP_MAX - IMP_MIN) * curve) * thinness
    }

    /// Remove an executed order's quantity from the book
    pub fn consume(&mut self, qty: Shares) {
        self.available_depth =
            (self.available_depth - qty as f64).clamp(DEPTH_FLOOR, BASE_DEPTH);
    }

    /// Restore depth for `elapsed_ms` of elapsed time
    pub fn replenish(&mut self, elapsed_ms: i64) {
        if elapsed_ms <= 0 {
            return;
        }
        let refill = BASE_DEPTH * REPLENISH_PER_SEC * (elapsed_ms as f64 / 1000.0);
        self.available_depth =
            (self.available_depth + refill).clamp(DEPTH_FLOOR, BASE_DEPTH);
    }
}

impl Default for LiquidityState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_orders_pay_the_floor() {
        let liq = LiquidityState::new();

        // Anything up to the 100-share allowance sits on the floor
        assert_eq!(liq.impact_magnitude(1), IMP_MIN);
        assert_eq!(liq.impact_magnitude(100), IMP_MIN);
    }

    #[test]
    fn test_full_size_order_hits_the_ceiling() {
        let liq = LiquidityState::new();

        // 1000 shares: curve input (1000-100)/900 = 1
        assert!((liq.impact_magnitude(1000) - IMP_MAX).abs() < 1e-12);
    }

    #[test]
    fn test_impact_ramp_is_convex() {
        let liq = LiquidityState::new();

        let mid_point = liq.impact_magnitude(550); // halfway through the ramp
        let linear_mid = IMP_MIN + (IMP_MAX - IMP_MIN) * 0.5;
        assert!(mid_point < linear_mid, "power curve should undercut linear");
    }

    #[test]
    fn test_thin_book_amplifies_impact() {
        let mut liq = LiquidityState::new();
        let full_book = liq.impact_magnitude(500);

        liq.consume(750);
        assert_eq!(liq.available_depth, 250.0);
        let thin_book = liq.impact_magnitude(500);

        // (1000/250)^0.5 = 2x amplification
        assert!((thin_book - 2.0 * full_book).abs() < 1e-12);
    }

    #[test]
    fn test_consume_clamps_to_floor() {
        let mut liq = LiquidityState::new();
        liq.consume(5000);
        assert_eq!(liq.available_depth, DEPTH_FLOOR);
    }

    #[test]
    fn test_replenish_converges_to_base_depth() {
        let mut liq = LiquidityState::new();
        liq.consume(900);

        // 100ms ticks with no trading: depth must recover fully
        for _ in 0..1000 {
            liq.replenish(100);
        }
        assert_eq!(liq.available_depth, BASE_DEPTH);
    }

    #[test]
    fn test_replenish_is_proportional_to_elapsed_time() {
        let mut a = LiquidityState::new();
        let mut b = LiquidityState::new();
        a.consume(900);
        b.consume(900);

        a.replenish(1000);
        for _ in 0..10 {
            b.replenish(100);
        }
        assert!((a.available_depth - b.available_depth).abs() < 1e-9);
    }

    #[test]
    fn test_replenish_ignores_non_positive_elapsed() {
        let mut liq = LiquidityState::new();
        liq.consume(500);
        let before = liq.available_depth;
        liq.replenish(0);
        liq.replenish(-50);
        assert_eq!(liq.available_depth, before);
    }
}
