//! Caplet / floorlet on an Ibor fixing.

use irmc_cashflows::{Coupon, CouponIbor, Payment};
use irmc_core::{Currency, IborIndex, Rate, Real, Time};

/// A caplet or floorlet paying
/// `N·δ_pay·max(ω(ibor − K), 0)` at the payment time, `ω = +1` for a cap.
///
/// The position is carried by the sign of the notional.
#[derive(Debug, Clone, PartialEq)]
pub struct CapFloorIbor {
    coupon: CouponIbor,
    strike: Rate,
    is_cap: bool,
}

impl CapFloorIbor {
    /// Create a caplet (`is_cap`) or floorlet on the fixing of `coupon`.
    pub fn new(coupon: CouponIbor, strike: Rate, is_cap: bool) -> Self {
        Self {
            coupon,
            strike,
            is_cap,
        }
    }

    /// The reference coupon.
    pub fn coupon(&self) -> &CouponIbor {
        &self.coupon
    }

    /// Strike rate.
    pub fn strike(&self) -> Rate {
        self.strike
    }

    /// `true` for a cap.
    pub fn is_cap(&self) -> bool {
        self.is_cap
    }

    /// `+1` for a cap, `-1` for a floor.
    pub fn omega(&self) -> Real {
        if self.is_cap {
            1.0
        } else {
            -1.0
        }
    }

    /// Ibor index.
    pub fn index(&self) -> &IborIndex {
        self.coupon.index()
    }

    /// Currency.
    pub fn currency(&self) -> &Currency {
        self.coupon.currency()
    }

    /// Fixing time.
    pub fn fixing_time(&self) -> Time {
        self.coupon.fixing_time()
    }

    /// Payment time.
    pub fn payment_time(&self) -> Time {
        self.coupon.payment_time()
    }

    /// Signed notional.
    pub fn notional(&self) -> Real {
        self.coupon.notional()
    }

    /// Accrual factor of the payment.
    pub fn payment_year_fraction(&self) -> Real {
        self.coupon.payment_year_fraction()
    }

    /// Same option on the other side of the strike (cap ↔ floor).
    pub fn with_cap_floor_switched(&self) -> Self {
        Self {
            is_cap: !self.is_cap,
            ..self.clone()
        }
    }

    /// Same option with the opposite position.
    pub fn with_notional_flipped(&self) -> Self {
        Self {
            coupon: self.coupon.with_notional(-self.coupon.notional()),
            ..self.clone()
        }
    }
}
