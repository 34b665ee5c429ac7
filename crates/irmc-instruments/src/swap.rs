//! Fixed-for-Ibor swap.

use irmc_cashflows::{Annuity, Coupon, CouponFixed, CouponIbor};
use irmc_core::{errors::Result, Currency, Rate, Real};

/// A swap exchanging a fixed leg against an Ibor leg.
///
/// The swap is a payer swap when the fixed leg is paid.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapFixedIbor {
    fixed_leg: Annuity<CouponFixed>,
    ibor_leg: Annuity<CouponIbor>,
}

impl SwapFixedIbor {
    /// Create a swap; the legs must be in the same currency and on opposite
    /// sides.
    pub fn new(fixed_leg: Annuity<CouponFixed>, ibor_leg: Annuity<CouponIbor>) -> Result<Self> {
        irmc_core::ensure!(
            fixed_leg.currency() == ibor_leg.currency(),
            "swap legs must share a currency"
        );
        irmc_core::ensure!(
            fixed_leg.is_payer() != ibor_leg.is_payer(),
            "swap legs must be on opposite sides"
        );
        Ok(Self {
            fixed_leg,
            ibor_leg,
        })
    }

    /// Fixed leg.
    pub fn fixed_leg(&self) -> &Annuity<CouponFixed> {
        &self.fixed_leg
    }

    /// Ibor leg.
    pub fn ibor_leg(&self) -> &Annuity<CouponIbor> {
        &self.ibor_leg
    }

    /// Currency of the swap.
    pub fn currency(&self) -> &Currency {
        self.fixed_leg.currency()
    }

    /// `true` when the fixed leg is paid.
    pub fn is_payer(&self) -> bool {
        self.fixed_leg.is_payer()
    }

    /// Fixed rate of the first fixed coupon.
    pub fn fixed_rate(&self) -> Rate {
        self.fixed_leg.nth(0).fixed_rate()
    }

    /// Cash-settled annuity for swap rate `rate`:
    /// `N/S · (1 − (1 + S/m)^{−n})`, with `N` the absolute fixed notional,
    /// `m` the fixed payments per year and `n` the number of fixed
    /// payments. Tends to `N·n/m` as `S → 0`.
    pub fn annuity_cash(&self, rate: Rate) -> Real {
        let first = self.fixed_leg.nth(0);
        let notional = first.notional().abs();
        let per_year = (1.0 / first.payment_year_fraction()).round().max(1.0);
        let n = self.fixed_leg.nb_payments() as Real;
        if rate.abs() < 1e-6 {
            // Second-order expansion around zero.
            return notional * n / per_year * (1.0 - (n + 1.0) * rate / (2.0 * per_year));
        }
        notional / rate * (1.0 - (1.0 + rate / per_year).powf(-n))
    }
}
