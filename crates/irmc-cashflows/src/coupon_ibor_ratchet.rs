//! Ibor ratchet coupon.
//!
//! The rate depends on the previous coupon's rate and the current fixing:
//!
//! ```text
//! main  = c₀·previous + c₁·ibor + c₂
//! floor = f₀·previous + f₁·ibor + f₂
//! cap   = k₀·previous + k₁·ibor + k₂
//! rate  = min(max(floor, main), cap)
//! ```

use crate::coupon::Coupon;
use crate::coupon_ibor::CouponIbor;
use crate::payment::Payment;
use irmc_core::{Currency, Rate, Real, Time};

/// Coefficients `(c₀, c₁, c₂)` of `c₀·previous + c₁·ibor + c₂`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatchetCoefficients {
    /// Weight of the previous coupon rate.
    pub previous: Real,
    /// Weight of the current Ibor fixing.
    pub ibor: Real,
    /// Constant term.
    pub constant: Real,
}

impl RatchetCoefficients {
    /// Create a coefficient triple.
    pub fn new(previous: Real, ibor: Real, constant: Real) -> Self {
        Self {
            previous,
            ibor,
            constant,
        }
    }

    /// `previous·p + ibor·i + constant`.
    pub fn evaluate(&self, previous: Rate, ibor: Rate) -> Rate {
        self.previous * previous + self.ibor * ibor + self.constant
    }
}

/// Ratchet coupon on an Ibor fixing.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponIborRatchet {
    ibor: CouponIbor,
    main: RatchetCoefficients,
    floor: RatchetCoefficients,
    cap: RatchetCoefficients,
}

impl CouponIborRatchet {
    /// Create a ratchet coupon on the fixing of `ibor`.
    pub fn new(
        ibor: CouponIbor,
        main: RatchetCoefficients,
        floor: RatchetCoefficients,
        cap: RatchetCoefficients,
    ) -> Self {
        Self {
            ibor,
            main,
            floor,
            cap,
        }
    }

    /// The underlying Ibor coupon.
    pub fn ibor(&self) -> &CouponIbor {
        &self.ibor
    }

    /// Main rate coefficients.
    pub fn main(&self) -> RatchetCoefficients {
        self.main
    }

    /// Floor coefficients.
    pub fn floor(&self) -> RatchetCoefficients {
        self.floor
    }

    /// Cap coefficients.
    pub fn cap(&self) -> RatchetCoefficients {
        self.cap
    }

    /// Coupon rate given the previous coupon rate and the current fixing.
    pub fn rate(&self, previous: Rate, ibor: Rate) -> Rate {
        let main = self.main.evaluate(previous, ibor);
        let floor = self.floor.evaluate(previous, ibor);
        let cap = self.cap.evaluate(previous, ibor);
        main.max(floor).min(cap)
    }
}

impl Payment for CouponIborRatchet {
    fn currency(&self) -> &Currency {
        self.ibor.currency()
    }

    fn payment_time(&self) -> Time {
        self.ibor.payment_time()
    }
}

impl Coupon for CouponIborRatchet {
    fn notional(&self) -> Real {
        self.ibor.notional()
    }

    fn payment_year_fraction(&self) -> Real {
        self.ibor.payment_year_fraction()
    }
}
