//! `Coupon` trait and the fixed-rate coupon.
//!
//! A coupon is a payment proportional to a notional and an accrual year
//! fraction. A negative notional means the coupon is paid.

use crate::payment::Payment;
use irmc_core::{Currency, Rate, Real, Time};

/// Base trait for interest-rate coupons.
pub trait Coupon: Payment {
    /// Signed notional.
    fn notional(&self) -> Real;

    /// Accrual year fraction of the payment.
    fn payment_year_fraction(&self) -> Real;
}

/// A coupon paying a fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponFixed {
    currency: Currency,
    payment_time: Time,
    payment_year_fraction: Real,
    notional: Real,
    fixed_rate: Rate,
}

impl CouponFixed {
    /// Create a new fixed coupon.
    pub fn new(
        currency: Currency,
        payment_time: Time,
        payment_year_fraction: Real,
        notional: Real,
        fixed_rate: Rate,
    ) -> Self {
        Self {
            currency,
            payment_time,
            payment_year_fraction,
            notional,
            fixed_rate,
        }
    }

    /// The fixed rate.
    pub fn fixed_rate(&self) -> Rate {
        self.fixed_rate
    }

    /// `notional · year_fraction · rate`.
    pub fn amount(&self) -> Real {
        self.notional * self.payment_year_fraction * self.fixed_rate
    }

    /// Same coupon with a different rate.
    pub fn with_rate(&self, fixed_rate: Rate) -> Self {
        Self {
            fixed_rate,
            ..self.clone()
        }
    }
}

impl Payment for CouponFixed {
    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn payment_time(&self) -> Time {
        self.payment_time
    }
}

impl Coupon for CouponFixed {
    fn notional(&self) -> Real {
        self.notional
    }

    fn payment_year_fraction(&self) -> Real {
        self.payment_year_fraction
    }
}
