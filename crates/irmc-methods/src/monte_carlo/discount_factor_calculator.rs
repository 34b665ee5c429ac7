//! Payoffs on simulated discount factors (Hull-White, G2++).
//!
//! Every method returns the payoff summed over the block's paths; the
//! orchestrator rescales once by the numeraire discount factor and the
//! total path count.

use super::data_bundle::MonteCarloDiscountFactorDataBundle;
use irmc_core::{errors::Result, Real};
use irmc_instruments::{
    CapFloorIbor, InstrumentDerivativeVisitor, SwaptionCashFixedIbor, SwaptionPhysicalFixedIbor,
};

/// Sums path-wise payoffs of caps/floors and swaptions over one block.
pub struct MonteCarloDiscountFactorCalculator<'a> {
    bundle: &'a MonteCarloDiscountFactorDataBundle,
}

impl<'a> MonteCarloDiscountFactorCalculator<'a> {
    /// Calculator on one block of simulated discount factors.
    pub fn new(bundle: &'a MonteCarloDiscountFactorDataBundle) -> Self {
        Self { bundle }
    }
}

/// Number of fixed, floating and settlement impacts of a cash swaption.
pub(crate) fn cash_swaption_split(
    swaption: &SwaptionCashFixedIbor,
    nb_impact: usize,
) -> Result<(usize, usize)> {
    let nb_fixed = swaption.underlying().fixed_leg().nb_payments();
    irmc_core::ensure_shape!(
        nb_impact >= nb_fixed + 2,
        "cash swaption needs {nb_fixed} fixed impacts, floating impacts and a settlement; got {nb_impact}"
    );
    Ok((nb_fixed, nb_impact - 1))
}

/// Path-wise cash swaption payoff before the position sign.
pub(crate) fn cash_swaption_payoff(
    swaption: &SwaptionCashFixedIbor,
    amounts: &[Real],
    discount: &[Real],
    nb_fixed: usize,
    settlement: usize,
) -> Real {
    let omega = if swaption.is_call() { 1.0 } else { -1.0 };
    let pvbp: Real = (0..nb_fixed).map(|cf| amounts[cf] * discount[cf]).sum();
    let float: Real = (nb_fixed..settlement).map(|cf| amounts[cf] * discount[cf]).sum();
    let swap_rate = float / pvbp;
    let annuity = swaption.underlying().annuity_cash(swap_rate);
    annuity * (omega * (swap_rate - swaption.strike())).max(0.0) * discount[settlement]
}

impl InstrumentDerivativeVisitor for MonteCarloDiscountFactorCalculator<'_> {
    type Output = Real;
    const NAME: &'static str = "MonteCarloDiscountFactorCalculator";

    fn visit_cap_floor_ibor(&mut self, cap: &CapFloorIbor) -> Result<Real> {
        let a = &self.bundle.impact_amount[0];
        irmc_core::ensure_shape!(a.len() == 3, "cap/floor expects 3 impacts, got {}", a.len());
        let delta = cap.coupon().fixing_accrual_factor();
        let omega = cap.omega();
        let strike = cap.strike();
        let sum: Real = self
            .bundle
            .path_discount_factor
            .iter()
            .map(|path| {
                let d = &path[0];
                let ibor = (-a[0] * d[0] / (a[1] * d[1]) - 1.0) / delta;
                (omega * (ibor - strike)).max(0.0) * a[2] * d[2]
            })
            .sum();
        Ok(sum * cap.notional() * cap.payment_year_fraction())
    }

    fn visit_swaption_physical_fixed_ibor(&mut self, swaption: &SwaptionPhysicalFixedIbor) -> Result<Real> {
        let a = &self.bundle.impact_amount[0];
        let sum: Real = self
            .bundle
            .path_discount_factor
            .iter()
            .map(|path| {
                let value: Real = a.iter().zip(&path[0]).map(|(a, d)| a * d).sum();
                value.max(0.0)
            })
            .sum();
        Ok(sum * swaption.position().sign())
    }

    fn visit_swaption_cash_fixed_ibor(&mut self, swaption: &SwaptionCashFixedIbor) -> Result<Real> {
        let a = &self.bundle.impact_amount[0];
        let (nb_fixed, settlement) = cash_swaption_split(swaption, a.len())?;
        let sum: Real = self
            .bundle
            .path_discount_factor
            .iter()
            .map(|path| cash_swaption_payoff(swaption, a, &path[0], nb_fixed, settlement))
            .sum();
        Ok(sum * swaption.position().sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use irmc_cashflows::CouponIbor;
    use irmc_core::{Currency, IborIndex};
    use irmc_instruments::InstrumentDerivative;

    fn cap(is_cap: bool) -> CapFloorIbor {
        let index = IborIndex::new("EURIBOR3M", Currency::eur());
        let coupon = CouponIbor::new(Currency::eur(), 1.25, 0.25, 100.0, index, 1.0, 1.0, 1.25, 0.25);
        CapFloorIbor::new(coupon, 0.02, is_cap)
    }

    #[test]
    fn cap_payoff_from_discount_ratios() {
        // D_s / D_e = 1.01 → ibor = 4 %.
        let bundle = MonteCarloDiscountFactorDataBundle::new(
            vec![vec![vec![1.01, 1.0, 1.0]], vec![vec![1.0025, 1.0, 1.0]]],
            vec![vec![1.0, -1.0, 1.0]],
        )
        .unwrap();
        let mut calc = MonteCarloDiscountFactorCalculator::new(&bundle);
        let sum_cap = InstrumentDerivative::from(cap(true)).accept(&mut calc).unwrap();
        // Second path: ibor = 1 %, out of the money.
        assert_relative_eq!(sum_cap, 0.02 * 100.0 * 0.25, epsilon = 1e-12);
        let sum_floor = InstrumentDerivative::from(cap(false)).accept(&mut calc).unwrap();
        assert_relative_eq!(sum_floor, 0.01 * 100.0 * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn coupon_unsupported() {
        let bundle = MonteCarloDiscountFactorDataBundle::new(vec![], vec![vec![]]).unwrap();
        let index = IborIndex::new("EURIBOR3M", Currency::eur());
        let coupon = CouponIbor::new(Currency::eur(), 1.25, 0.25, 100.0, index, 1.0, 1.0, 1.25, 0.25);
        let res = InstrumentDerivative::from(coupon).accept(&mut MonteCarloDiscountFactorCalculator::new(&bundle));
        assert!(matches!(res, Err(irmc_core::Error::UnsupportedInstrument { .. })));
    }
}
