use serde::{Deserialize, Serialize};

use crate::entities::Side;
use crate::values::{MAX_POS, Price, Shares};

/// Fee charged on every fill, as a fraction of notional
const FEE_RATE: f64 = 0.0001;

/// An executed order, as settled against the ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// Side of the order
    pub side: Side,
    /// Filled quantity (after position-cap clamping)
    pub qty: Shares,
    /// Volume-weighted fill price
    pub vwap: Price,
    /// qty * vwap
    pub notional: Price,
    /// Fee debited from cash
    pub fee: Price,
}

/// Cash, short-sale reserve, signed position and running cost basis
///
/// Proceeds from short sales are parked in `reserve` until the short is
/// covered; once the position returns to flat-or-long the reserve is swept
/// back into spendable cash.
///
/// Invariants after every settlement:
/// - `reserve >= 0`
/// - `reserve > 0` implies `position < 0`
/// - `avg_price` is `Some` iff `position != 0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Spendable cash balance
    pub cash: Price,
    /// Short-sale proceeds held until the short is covered
    pub reserve: Price,
    /// Signed position in shares (positive long, negative short)
    pub position: Shares,
    /// Volume-weighted cost basis of the open position
    pub avg_price: Option<Price>,
}

impl Ledger {
    /// Open a ledger with a starting cash balance
    pub fn new(cash: Price) -> Self {
        Self {
            cash,
            reserve: 0.0,
            position: 0,
            avg_price: None,
        }
    }

    /// Largest quantity of `side` that keeps |position| within the cap
    ///
    /// Returns zero when the cap is already binding in that direction.
    pub fn clamp_quantity(&self, side: Side, requested: Shares) -> Shares {
        let max_add = match side {
            Side::Buy => MAX_POS - self.position,
            Side::Sell => MAX_POS + self.position,
        };
        requested.clamp(0, max_add.max(0))
    }

    /// Settle a fill of `qty` shares at `vwap` against this ledger
    ///
    /// The caller is responsible for clamping `qty` via [`clamp_quantity`]
    /// first; `qty` must be positive.
    ///
    /// [`clamp_quantity`]: Ledger::clamp_quantity
    pub fn settle(&mut self, side: Side, qty: Shares, vwap: Price) -> Fill {
        let notional = qty as f64 * vwap;
        let fee = notional * FEE_RATE;

        let p_old = self.position;
        let p_new = p_old + side.sign() * qty;

        self.update_avg_price(p_old, p_new, qty, vwap);

        // Fee is always paid from cash, regardless of side
        self.cash -= fee;

        match side {
            Side::Buy => {
                if p_old < 0 {
                    // Covering a short: spend held proceeds first,
                    // then cash for any shortfall
                    self.reserve -= notional;
                    if self.reserve < 0.0 {
                        self.cash += self.reserve;
                        self.reserve = 0.0;
                    }
                } else {
                    self.cash -= notional;
                }
            }
            Side::Sell => {
                if p_old > 0 {
                    self.cash += notional;
                } else {
                    // Opening or extending a short: proceeds are not
                    // spendable until the short is covered
                    self.reserve += notional;
                }
            }
        }

        self.position = p_new;

        // Short fully closed out: held proceeds become spendable
        if self.position >= 0 && self.reserve > 0.0 {
            self.cash += self.reserve;
            self.reserve = 0.0;
        }

        Fill {
            side,
            qty,
            vwap,
            notional,
            fee,
        }
    }

    /// Cost-basis state machine
    ///
    /// Opening trades take the fill's vwap; same-direction adds reweight by
    /// notional; a trade that reduces magnitude without crossing zero leaves
    /// the basis untouched; crossing zero re-bases the residual at the
    /// fill's vwap; flattening clears it.
    fn update_avg_price(&mut self, p_old: Shares, p_new: Shares, qty: Shares, vwap: Price) {
        if p_old == 0 {
            self.avg_price = Some(vwap);
        } else if p_old.signum() == p_new.signum() {
            if p_new.abs() > p_old.abs() {
                let prior = self.avg_price.unwrap_or(vwap);
                self.avg_price = Some(
                    (p_old.abs() as f64 * prior + qty as f64 * vwap) / p_new.abs() as f64,
                );
            }
            // Partial reduction: basis deliberately unchanged
        } else {
            self.avg_price = if p_new == 0 { None } else { Some(vwap) };
        }
    }

    /// Liquidation value at the given mark: cash + reserve + position * mid
    pub fn mark_to_market(&self, mid: Price) -> Price {
        self.cash + self.reserve + self.position as f64 * mid
    }
}
