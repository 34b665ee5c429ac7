//! `Annuity` — an ordered sequence of payments in one currency, and
//! builders for regular fixed and Ibor legs.

use crate::coupon::{Coupon, CouponFixed};
use crate::coupon_ibor::CouponIbor;
use crate::payment::Payment;
use irmc_core::{errors::Result, Currency, IborIndex, Rate, Real, Time};

/// A leg of payments of the same type.
#[derive(Debug, Clone, PartialEq)]
pub struct Annuity<P> {
    payments: Vec<P>,
}

impl<P: Payment> Annuity<P> {
    /// Create an annuity; payments must share a currency.
    pub fn new(payments: Vec<P>) -> Result<Self> {
        irmc_core::ensure!(!payments.is_empty(), "an annuity needs at least one payment");
        let currency = payments[0].currency();
        irmc_core::ensure!(
            payments.iter().all(|p| p.currency() == currency),
            "all payments of an annuity must share one currency"
        );
        Ok(Self { payments })
    }

    /// All payments.
    pub fn payments(&self) -> &[P] {
        &self.payments
    }

    /// The `i`-th payment.
    pub fn nth(&self, i: usize) -> &P {
        &self.payments[i]
    }

    /// Number of payments.
    pub fn nb_payments(&self) -> usize {
        self.payments.len()
    }

    /// Iterate over the payments.
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.payments.iter()
    }

    /// Currency shared by the payments.
    pub fn currency(&self) -> &Currency {
        self.payments[0].currency()
    }

    /// Payment time of the last payment.
    pub fn last_payment_time(&self) -> Time {
        self.payments[self.payments.len() - 1].payment_time()
    }
}

impl<P: Coupon> Annuity<P> {
    /// `true` when the first coupon has a negative notional.
    pub fn is_payer(&self) -> bool {
        self.payments[0].notional() < 0.0
    }
}

impl<'a, P> IntoIterator for &'a Annuity<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.payments.iter()
    }
}

// ── Regular leg builders ─────────────────────────────────────────────────────

/// Regular accrual schedule `start, start + period, …` with `nb_periods`
/// periods; payment at the end of each period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegSchedule {
    /// Start of the first period.
    pub start: Time,
    /// Length of each period (also the accrual factor).
    pub period: Time,
    /// Number of periods.
    pub nb_periods: usize,
}

impl LegSchedule {
    /// Create a schedule.
    pub fn new(start: Time, period: Time, nb_periods: usize) -> Self {
        Self {
            start,
            period,
            nb_periods,
        }
    }

    fn periods(&self) -> impl Iterator<Item = (Time, Time)> + '_ {
        (0..self.nb_periods).map(move |i| {
            let s = self.start + i as Real * self.period;
            (s, s + self.period)
        })
    }
}

fn signed(notional: Real, is_payer: bool) -> Real {
    if is_payer {
        -notional.abs()
    } else {
        notional.abs()
    }
}

/// Fixed leg paying `rate` on every period of `schedule`.
pub fn fixed_leg(
    currency: Currency,
    schedule: LegSchedule,
    notional: Real,
    rate: Rate,
    is_payer: bool,
) -> Result<Annuity<CouponFixed>> {
    let n = signed(notional, is_payer);
    Annuity::new(
        schedule
            .periods()
            .map(|(_, e)| CouponFixed::new(currency.clone(), e, schedule.period, n, rate))
            .collect(),
    )
}

/// Ibor leg fixing at the start of every period of `schedule`.
pub fn ibor_leg(
    index: &IborIndex,
    schedule: LegSchedule,
    notional: Real,
    is_payer: bool,
) -> Result<Annuity<CouponIbor>> {
    let n = signed(notional, is_payer);
    Annuity::new(
        schedule
            .periods()
            .map(|(s, e)| {
                CouponIbor::new(
                    index.currency().clone(),
                    e,
                    schedule.period,
                    n,
                    index.clone(),
                    s,
                    s,
                    e,
                    schedule.period,
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn regular_legs() {
        let index = IborIndex::new("EURIBOR6M", Currency::eur());
        let schedule = LegSchedule::new(1.0, 0.5, 4);
        let fixed = fixed_leg(Currency::eur(), schedule, 100.0, 0.02, true).unwrap();
        assert_eq!(fixed.nb_payments(), 4);
        assert!(fixed.is_payer());
        assert_relative_eq!(fixed.last_payment_time(), 3.0);
        assert_relative_eq!(fixed.nth(0).amount(), -1.0);
        let float = ibor_leg(&index, schedule, 100.0, false).unwrap();
        assert!(!float.is_payer());
        assert_relative_eq!(float.nth(2).fixing_time(), 2.0);
        assert_relative_eq!(float.nth(2).payment_time(), 2.5);
    }

    #[test]
    fn annuity_rejects_mixed_currencies() {
        let a = CouponFixed::new(Currency::eur(), 1.0, 1.0, 1.0, 0.01);
        let b = CouponFixed::new(Currency::usd(), 2.0, 1.0, 1.0, 0.01);
        assert!(Annuity::new(vec![a, b]).is_err());
        assert!(Annuity::<CouponFixed>::new(vec![]).is_err());
    }
}
