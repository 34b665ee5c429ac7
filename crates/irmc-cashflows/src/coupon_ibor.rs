//! Ibor coupons: plain (with additive spread) and geared.

use crate::coupon::{Coupon, CouponFixed};
use crate::payment::Payment;
use irmc_core::{Currency, IborIndex, Rate, Real, Spread, Time};

/// A coupon paying `ibor + spread` where the Ibor rate fixes at
/// `fixing_time` on the period `[fixing_period_start_time,
/// fixing_period_end_time]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIbor {
    currency: Currency,
    payment_time: Time,
    payment_year_fraction: Real,
    notional: Real,
    index: IborIndex,
    fixing_time: Time,
    fixing_period_start_time: Time,
    fixing_period_end_time: Time,
    fixing_accrual_factor: Real,
    spread: Spread,
}

impl CouponIbor {
    /// Create a new Ibor coupon without spread.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        payment_time: Time,
        payment_year_fraction: Real,
        notional: Real,
        index: IborIndex,
        fixing_time: Time,
        fixing_period_start_time: Time,
        fixing_period_end_time: Time,
        fixing_accrual_factor: Real,
    ) -> Self {
        Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            index,
            fixing_time,
            fixing_period_start_time,
            fixing_period_end_time,
            fixing_accrual_factor,
            spread: 0.0,
        }
    }

    /// Same coupon paying an additional `spread`.
    pub fn with_spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }

    /// Same coupon with a different notional.
    pub fn with_notional(&self, notional: Real) -> Self {
        Self {
            notional,
            ..self.clone()
        }
    }

    /// The Ibor index.
    pub fn index(&self) -> &IborIndex {
        &self.index
    }

    /// Fixing time.
    pub fn fixing_time(&self) -> Time {
        self.fixing_time
    }

    /// Start of the fixing period.
    pub fn fixing_period_start_time(&self) -> Time {
        self.fixing_period_start_time
    }

    /// End of the fixing period.
    pub fn fixing_period_end_time(&self) -> Time {
        self.fixing_period_end_time
    }

    /// Accrual factor of the fixing period.
    pub fn fixing_accrual_factor(&self) -> Real {
        self.fixing_accrual_factor
    }

    /// Additive spread.
    pub fn spread(&self) -> Spread {
        self.spread
    }

    /// The coupon once its rate is known: a fixed coupon paying
    /// `ibor + spread`.
    pub fn to_fixed(&self, ibor: Rate) -> CouponFixed {
        CouponFixed::new(
            self.currency.clone(),
            self.payment_time,
            self.payment_year_fraction,
            self.notional,
            ibor + self.spread,
        )
    }
}

impl Payment for CouponIbor {
    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn payment_time(&self) -> Time {
        self.payment_time
    }
}

impl Coupon for CouponIbor {
    fn notional(&self) -> Real {
        self.notional
    }

    fn payment_year_fraction(&self) -> Real {
        self.payment_year_fraction
    }
}

/// A coupon paying `gearing · ibor + spread`.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborGearing {
    ibor: CouponIbor,
    gearing: Real,
}

impl CouponIborGearing {
    /// Create a geared coupon; the spread of `ibor` is the additive spread.
    pub fn new(ibor: CouponIbor, gearing: Real) -> Self {
        Self { ibor, gearing }
    }

    /// The underlying Ibor coupon.
    pub fn ibor(&self) -> &CouponIbor {
        &self.ibor
    }

    /// Multiplicative factor on the Ibor rate.
    pub fn gearing(&self) -> Real {
        self.gearing
    }

    /// Additive spread.
    pub fn spread(&self) -> Spread {
        self.ibor.spread
    }
}

impl Payment for CouponIborGearing {
    fn currency(&self) -> &Currency {
        self.ibor.currency()
    }

    fn payment_time(&self) -> Time {
        self.ibor.payment_time
    }
}

impl Coupon for CouponIborGearing {
    fn notional(&self) -> Real {
        self.ibor.notional
    }

    fn payment_year_fraction(&self) -> Real {
        self.ibor.payment_year_fraction
    }
}
