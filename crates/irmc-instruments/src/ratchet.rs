//! Annuity of Ibor ratchet coupons.

use irmc_cashflows::{
    Annuity, Coupon, CouponFixed, CouponIbor, CouponIborGearing, CouponIborRatchet, Payment,
};
use irmc_core::{errors::Result, Currency, Real, Time};

/// A coupon of a ratchet annuity.
#[derive(Debug, Clone, PartialEq)]
pub enum RatchetCoupon {
    /// Already fixed coupon.
    Fixed(CouponFixed),
    /// First coupon paying `gearing·ibor + spread`.
    Gearing(CouponIborGearing),
    /// Coupon depending on the previous rate.
    Ratchet(CouponIborRatchet),
}

impl RatchetCoupon {
    /// The Ibor coupon whose fixing drives this coupon, if any.
    pub fn ibor(&self) -> Option<&CouponIbor> {
        match self {
            RatchetCoupon::Fixed(_) => None,
            RatchetCoupon::Gearing(c) => Some(c.ibor()),
            RatchetCoupon::Ratchet(c) => Some(c.ibor()),
        }
    }

    /// Time at which the coupon rate becomes known; 0 for a fixed coupon.
    pub fn decision_time(&self) -> Time {
        self.ibor().map_or(0.0, CouponIbor::fixing_time)
    }
}

impl Payment for RatchetCoupon {
    fn currency(&self) -> &Currency {
        match self {
            RatchetCoupon::Fixed(c) => c.currency(),
            RatchetCoupon::Gearing(c) => c.currency(),
            RatchetCoupon::Ratchet(c) => c.currency(),
        }
    }

    fn payment_time(&self) -> Time {
        match self {
            RatchetCoupon::Fixed(c) => c.payment_time(),
            RatchetCoupon::Gearing(c) => c.payment_time(),
            RatchetCoupon::Ratchet(c) => c.payment_time(),
        }
    }
}

impl Coupon for RatchetCoupon {
    fn notional(&self) -> Real {
        match self {
            RatchetCoupon::Fixed(c) => c.notional(),
            RatchetCoupon::Gearing(c) => c.notional(),
            RatchetCoupon::Ratchet(c) => c.notional(),
        }
    }

    fn payment_year_fraction(&self) -> Real {
        match self {
            RatchetCoupon::Fixed(c) => c.payment_year_fraction(),
            RatchetCoupon::Gearing(c) => c.payment_year_fraction(),
            RatchetCoupon::Ratchet(c) => c.payment_year_fraction(),
        }
    }
}

/// Annuity whose first coupon is fixed or geared and whose later coupons
/// are ratchets on the previous rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnuityCouponIborRatchet {
    coupons: Annuity<RatchetCoupon>,
}

impl AnnuityCouponIborRatchet {
    /// Create the annuity.
    pub fn new(coupons: Vec<RatchetCoupon>) -> Result<Self> {
        let coupons = Annuity::new(coupons)?;
        irmc_core::ensure!(
            !matches!(coupons.nth(0), RatchetCoupon::Ratchet(_)),
            "the first coupon of a ratchet annuity must be fixed or geared"
        );
        irmc_core::ensure!(
            coupons
                .iter()
                .skip(1)
                .all(|c| matches!(c, RatchetCoupon::Ratchet(_))),
            "every coupon after the first must be a ratchet coupon"
        );
        Ok(Self { coupons })
    }

    /// The coupons.
    pub fn coupons(&self) -> &Annuity<RatchetCoupon> {
        &self.coupons
    }

    /// Number of coupons.
    pub fn nb_payments(&self) -> usize {
        self.coupons.nb_payments()
    }

    /// Currency.
    pub fn currency(&self) -> &Currency {
        self.coupons.currency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irmc_cashflows::RatchetCoefficients;
    use irmc_core::IborIndex;

    fn ibor(start: Time) -> CouponIbor {
        let index = IborIndex::new("EURIBOR3M", Currency::eur());
        CouponIbor::new(
            Currency::eur(),
            start + 0.25,
            0.25,
            1.0,
            index,
            start,
            start,
            start + 0.25,
            0.25,
        )
    }

    fn ratchet(start: Time) -> RatchetCoupon {
        let c = RatchetCoefficients::new(0.0, 1.0, 0.0);
        RatchetCoupon::Ratchet(CouponIborRatchet::new(ibor(start), c, c, c))
    }

    #[test]
    fn structure_checks() {
        let first = RatchetCoupon::Fixed(CouponFixed::new(Currency::eur(), 0.25, 0.25, 1.0, 0.02));
        let ok = AnnuityCouponIborRatchet::new(vec![first.clone(), ratchet(0.25), ratchet(0.5)]);
        assert!(ok.is_ok());
        assert!(AnnuityCouponIborRatchet::new(vec![ratchet(0.0)]).is_err());
        assert!(AnnuityCouponIborRatchet::new(vec![first.clone(), first]).is_err());
    }

    #[test]
    fn decision_times() {
        let first = RatchetCoupon::Gearing(CouponIborGearing::new(ibor(0.5), 1.2));
        assert_eq!(first.decision_time(), 0.5);
        let fixed = RatchetCoupon::Fixed(CouponFixed::new(Currency::eur(), 0.25, 0.25, 1.0, 0.02));
        assert_eq!(fixed.decision_time(), 0.0);
    }
}
