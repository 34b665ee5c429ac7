//! Cash-flow equivalents.
//!
//! An instrument whose value is linear in discount factors is replaced by
//! fixed amounts paid at fixed times. For an Ibor coupon with notional `N`,
//! payment accrual `δ_p`, fixing period `[s, e]` and fixing accrual `δ_f`:
//!
//! ```text
//! β = (1 + δ_f·F) · P_d(e) / P_d(s)
//! (s, N·δ_p/δ_f·β), (p, −N·δ_p/δ_f), (p, N·δ_p·spread)
//! ```
//!
//! The first two flows reproduce the coupon value exactly when the
//! payment time `p` equals the fixing period end `e`.

use crate::derivative::InstrumentDerivativeVisitor;
use crate::swap::SwapFixedIbor;
use irmc_cashflows::{Annuity, Coupon, CouponFixed, CouponIbor, CouponIborGearing, Payment, PaymentFixed};
use irmc_core::{errors::Result, Real, Time};
use irmc_termstructures::{MulticurveProvider, MulticurveSensitivity};

/// Flows closer than this are merged.
const TIME_TOLERANCE: Time = 1.0e-12;

/// `β = (1 + δ_f·F)·P_d(e)/P_d(s)` of the fixing period of `coupon`.
pub fn ibor_beta(multicurve: &dyn MulticurveProvider, coupon: &CouponIbor) -> Result<Real> {
    let (s, e) = (coupon.fixing_period_start_time(), coupon.fixing_period_end_time());
    let delta = coupon.fixing_accrual_factor();
    let forward = multicurve.simply_compounded_forward_rate(coupon.index(), s, e, delta)?;
    let ccy = coupon.currency();
    Ok((1.0 + delta * forward) * multicurve.discount_factor(ccy, e)?
        / multicurve.discount_factor(ccy, s)?)
}

/// Curve sensitivity of [`ibor_beta`]:
/// `∂β/∂F = δ_f·P_d(e)/P_d(s)`, `∂β/∂z_d(e) = −e·β`, `∂β/∂z_d(s) = s·β`.
pub fn ibor_beta_sensitivity(
    multicurve: &dyn MulticurveProvider,
    coupon: &CouponIbor,
) -> Result<MulticurveSensitivity> {
    let (s, e) = (coupon.fixing_period_start_time(), coupon.fixing_period_end_time());
    let delta = coupon.fixing_accrual_factor();
    let ccy = coupon.currency();
    let ratio = multicurve.discount_factor(ccy, e)? / multicurve.discount_factor(ccy, s)?;
    let forward = multicurve.simply_compounded_forward_rate(coupon.index(), s, e, delta)?;
    let beta = (1.0 + delta * forward) * ratio;
    let forward_part = multicurve
        .forward_rate_sensitivity(coupon.index(), s, e, delta)?
        .multiplied_by(delta * ratio);
    let discount_part = MulticurveSensitivity::of(
        multicurve.discounting_curve_name(ccy)?,
        vec![(s, s * beta), (e, -e * beta)],
    );
    Ok(forward_part.plus(&discount_part))
}

fn merge_amounts(mut flows: Vec<(Time, Real)>) -> Vec<(Time, Real)> {
    flows.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(Time, Real)> = Vec::with_capacity(flows.len());
    for (t, a) in flows {
        match merged.last_mut() {
            Some(last) if (t - last.0).abs() < TIME_TOLERANCE => last.1 += a,
            _ => merged.push((t, a)),
        }
    }
    merged
}

fn merge_sensitivities(
    mut flows: Vec<(Time, MulticurveSensitivity)>,
) -> Vec<(Time, MulticurveSensitivity)> {
    flows.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(Time, MulticurveSensitivity)> = Vec::with_capacity(flows.len());
    for (t, s) in flows {
        match merged.last_mut() {
            Some(last) if (t - last.0).abs() < TIME_TOLERANCE => last.1 += &s,
            _ => merged.push((t, s)),
        }
    }
    merged
}

// ── Amounts ──────────────────────────────────────────────────────────────────

/// Computes cash-flow equivalents of coupons, legs and swaps.
pub struct CashFlowEquivalentCalculator<'a> {
    multicurve: &'a dyn MulticurveProvider,
}

impl<'a> CashFlowEquivalentCalculator<'a> {
    /// Calculator on the given curves.
    pub fn new(multicurve: &'a dyn MulticurveProvider) -> Self {
        Self { multicurve }
    }

    /// `(payment, N·δ·c)`.
    pub fn coupon_fixed_flows(&self, coupon: &CouponFixed) -> Vec<(Time, Real)> {
        vec![(coupon.payment_time(), coupon.amount())]
    }

    /// Equivalent flows of an Ibor coupon, spread included.
    pub fn coupon_ibor_flows(&self, coupon: &CouponIbor) -> Result<Vec<(Time, Real)>> {
        let mut flows = self.ibor_rate_flows(coupon, 1.0)?;
        if coupon.spread() != 0.0 {
            flows.push((
                coupon.payment_time(),
                coupon.notional() * coupon.payment_year_fraction() * coupon.spread(),
            ));
        }
        Ok(merge_amounts(flows))
    }

    /// Equivalent flows of `gearing·ibor + spread`.
    pub fn coupon_ibor_gearing_flows(&self, coupon: &CouponIborGearing) -> Result<Vec<(Time, Real)>> {
        let ibor = coupon.ibor();
        let mut flows = self.ibor_rate_flows(ibor, coupon.gearing())?;
        flows.push((
            ibor.payment_time(),
            ibor.notional() * ibor.payment_year_fraction() * coupon.spread(),
        ));
        Ok(merge_amounts(flows))
    }

    /// Equivalent flows of the Ibor rate part of `coupon` only (no spread),
    /// scaled by `factor`.
    pub fn ibor_rate_flows(&self, coupon: &CouponIbor, factor: Real) -> Result<Vec<(Time, Real)>> {
        let beta = ibor_beta(self.multicurve, coupon)?;
        let scale = factor * coupon.notional() * coupon.payment_year_fraction()
            / coupon.fixing_accrual_factor();
        Ok(vec![
            (coupon.fixing_period_start_time(), scale * beta),
            (coupon.payment_time(), -scale),
        ])
    }

    /// Merged equivalent flows of an Ibor leg.
    pub fn ibor_leg_flows(&self, leg: &Annuity<CouponIbor>) -> Result<Vec<(Time, Real)>> {
        let mut flows = Vec::new();
        for coupon in leg {
            flows.extend(self.coupon_ibor_flows(coupon)?);
        }
        Ok(merge_amounts(flows))
    }

    /// Merged equivalent flows of a swap.
    pub fn swap_flows(&self, swap: &SwapFixedIbor) -> Result<Vec<(Time, Real)>> {
        let mut flows: Vec<(Time, Real)> = swap
            .fixed_leg()
            .iter()
            .flat_map(|c| self.coupon_fixed_flows(c))
            .collect();
        flows.extend(self.ibor_leg_flows(swap.ibor_leg())?);
        Ok(merge_amounts(flows))
    }

    fn to_annuity(
        &self,
        currency: &irmc_core::Currency,
        flows: Vec<(Time, Real)>,
    ) -> Result<Annuity<PaymentFixed>> {
        Annuity::new(
            flows
                .into_iter()
                .map(|(t, a)| PaymentFixed::new(currency.clone(), t, a))
                .collect(),
        )
    }
}

impl InstrumentDerivativeVisitor for CashFlowEquivalentCalculator<'_> {
    type Output = Annuity<PaymentFixed>;
    const NAME: &'static str = "CashFlowEquivalentCalculator";

    fn visit_coupon_fixed(&mut self, coupon: &CouponFixed) -> Result<Self::Output> {
        self.to_annuity(coupon.currency(), self.coupon_fixed_flows(coupon))
    }

    fn visit_coupon_ibor(&mut self, coupon: &CouponIbor) -> Result<Self::Output> {
        self.to_annuity(coupon.currency(), self.coupon_ibor_flows(coupon)?)
    }

    fn visit_swap_fixed_ibor(&mut self, swap: &SwapFixedIbor) -> Result<Self::Output> {
        self.to_annuity(swap.currency(), self.swap_flows(swap)?)
    }
}

// ── Sensitivities ────────────────────────────────────────────────────────────

/// Computes, for each equivalent flow time, the curve sensitivity of the
/// equivalent amount.
pub struct CashFlowEquivalentCurveSensitivityCalculator<'a> {
    multicurve: &'a dyn MulticurveProvider,
}

impl<'a> CashFlowEquivalentCurveSensitivityCalculator<'a> {
    /// Calculator on the given curves.
    pub fn new(multicurve: &'a dyn MulticurveProvider) -> Self {
        Self { multicurve }
    }

    /// Fixed amounts carry no curve sensitivity.
    pub fn coupon_fixed_sensitivities(
        &self,
        coupon: &CouponFixed,
    ) -> Vec<(Time, MulticurveSensitivity)> {
        vec![(coupon.payment_time(), MulticurveSensitivity::new())]
    }

    /// Sensitivities of the equivalent flows of an Ibor coupon.
    pub fn coupon_ibor_sensitivities(
        &self,
        coupon: &CouponIbor,
    ) -> Result<Vec<(Time, MulticurveSensitivity)>> {
        let scale =
            coupon.notional() * coupon.payment_year_fraction() / coupon.fixing_accrual_factor();
        let beta_sensitivity = ibor_beta_sensitivity(self.multicurve, coupon)?;
        Ok(merge_sensitivities(vec![
            (
                coupon.fixing_period_start_time(),
                beta_sensitivity.multiplied_by(scale),
            ),
            (coupon.payment_time(), MulticurveSensitivity::new()),
        ]))
    }

    /// Sensitivities of the merged equivalent flows of a swap.
    pub fn swap_sensitivities(
        &self,
        swap: &SwapFixedIbor,
    ) -> Result<Vec<(Time, MulticurveSensitivity)>> {
        let mut flows: Vec<(Time, MulticurveSensitivity)> = swap
            .fixed_leg()
            .iter()
            .flat_map(|c| self.coupon_fixed_sensitivities(c))
            .collect();
        for coupon in swap.ibor_leg() {
            flows.extend(self.coupon_ibor_sensitivities(coupon)?);
        }
        Ok(merge_sensitivities(flows))
    }
}

impl InstrumentDerivativeVisitor for CashFlowEquivalentCurveSensitivityCalculator<'_> {
    type Output = Vec<(Time, MulticurveSensitivity)>;
    const NAME: &'static str = "CashFlowEquivalentCurveSensitivityCalculator";

    fn visit_coupon_fixed(&mut self, coupon: &CouponFixed) -> Result<Self::Output> {
        Ok(self.coupon_fixed_sensitivities(coupon))
    }

    fn visit_coupon_ibor(&mut self, coupon: &CouponIbor) -> Result<Self::Output> {
        self.coupon_ibor_sensitivities(coupon)
    }

    fn visit_swap_fixed_ibor(&mut self, swap: &SwapFixedIbor) -> Result<Self::Output> {
        self.swap_sensitivities(swap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InstrumentDerivative;
    use approx::assert_relative_eq;
    use irmc_cashflows::{fixed_leg, ibor_leg, LegSchedule};
    use irmc_core::{Currency, IborIndex};
    use irmc_termstructures::{MulticurveProviderDiscount, YieldCurve};

    fn curves() -> (MulticurveProviderDiscount, IborIndex) {
        let index = IborIndex::new("EURIBOR6M", Currency::eur());
        let dsc = YieldCurve::new("EUR-DSC", &[0.5, 2.0, 5.0, 10.0], &[0.01, 0.012, 0.015, 0.02]).unwrap();
        let fwd = YieldCurve::new("EUR-FWD6M", &[0.5, 2.0, 5.0, 10.0], &[0.013, 0.016, 0.019, 0.024]).unwrap();
        let p = MulticurveProviderDiscount::new()
            .with_discount_curve(Currency::eur(), dsc)
            .with_forward_curve(&index, fwd);
        (p, index)
    }

    fn pv(p: &MulticurveProviderDiscount, flows: &[(Time, Real)]) -> Real {
        flows
            .iter()
            .map(|(t, a)| a * p.discount_factor(&Currency::eur(), *t).unwrap())
            .sum()
    }

    #[test]
    fn ibor_coupon_equivalent_reproduces_value() {
        let (p, index) = curves();
        let cpn = CouponIbor::new(Currency::eur(), 2.5, 0.5, 1_000.0, index.clone(), 2.0, 2.0, 2.5, 0.5)
            .with_spread(0.002);
        let calc = CashFlowEquivalentCalculator::new(&p);
        let flows = calc.coupon_ibor_flows(&cpn).unwrap();
        assert_eq!(flows.len(), 2);
        let f = p.simply_compounded_forward_rate(&index, 2.0, 2.5, 0.5).unwrap();
        let expected = 1_000.0 * 0.5 * (f + 0.002) * p.discount_factor(&Currency::eur(), 2.5).unwrap();
        assert_relative_eq!(pv(&p, &flows), expected, max_relative = 1e-12);
    }

    #[test]
    fn gearing_coupon_equivalent_reproduces_value() {
        let (p, index) = curves();
        let ibor = CouponIbor::new(Currency::eur(), 2.5, 0.5, 1_000.0, index.clone(), 2.0, 2.0, 2.5, 0.5)
            .with_spread(0.002);
        let cpn = CouponIborGearing::new(ibor, 1.5);
        let flows = CashFlowEquivalentCalculator::new(&p).coupon_ibor_gearing_flows(&cpn).unwrap();
        assert_eq!(flows.len(), 2);
        let f = p.simply_compounded_forward_rate(&index, 2.0, 2.5, 0.5).unwrap();
        let expected = 1_000.0 * 0.5 * (1.5 * f + 0.002) * p.discount_factor(&Currency::eur(), 2.5).unwrap();
        assert_relative_eq!(pv(&p, &flows), expected, max_relative = 1e-12);
    }

    #[test]
    fn swap_flows_are_merged_and_sorted() {
        let (p, index) = curves();
        let schedule = LegSchedule::new(1.0, 0.5, 4);
        let swap = SwapFixedIbor::new(
            fixed_leg(Currency::eur(), schedule, 100.0, 0.02, true).unwrap(),
            ibor_leg(&index, schedule, 100.0, false).unwrap(),
        )
        .unwrap();
        let annuity = InstrumentDerivative::from(swap.clone())
            .accept(&mut CashFlowEquivalentCalculator::new(&p))
            .unwrap();
        // Start 1.0, then 1.5, 2.0, 2.5, 3.0 each merged across both legs.
        assert_eq!(annuity.nb_payments(), 5);
        assert!(annuity
            .payments()
            .windows(2)
            .all(|w| w[1].payment_time() > w[0].payment_time()));
        let sensi = CashFlowEquivalentCurveSensitivityCalculator::new(&p)
            .swap_sensitivities(&swap)
            .unwrap();
        let times: Vec<Time> = sensi.iter().map(|s| s.0).collect();
        let cfe_times: Vec<Time> = annuity.iter().map(|c| c.payment_time()).collect();
        assert_eq!(times, cfe_times);
        assert!(sensi[4].1.is_empty());
    }

    #[test]
    fn beta_sensitivity_matches_bump() {
        let (p, index) = curves();
        let cpn = CouponIbor::new(Currency::eur(), 3.0, 0.5, 1.0, index, 2.5, 2.5, 3.0, 0.5);
        let base = ibor_beta(&p, &cpn).unwrap();
        let nodes = p.parameter_sensitivity(&ibor_beta_sensitivity(&p, &cpn).unwrap()).unwrap();
        let shift = 1e-7;
        for name in ["EUR-DSC", "EUR-FWD6M"] {
            for k in 0..4 {
                let bumped = p.with_bumped_curve_node(name, k, shift).unwrap();
                let fd = (ibor_beta(&bumped, &cpn).unwrap() - base) / shift;
                assert_relative_eq!(nodes[name][k], fd, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn unsupported_variant() {
        let (p, _) = curves();
        let cap = crate::CapFloorIbor::new(
            CouponIbor::new(
                Currency::eur(),
                1.5,
                0.5,
                1.0,
                IborIndex::new("EURIBOR6M", Currency::eur()),
                1.0,
                1.0,
                1.5,
                0.5,
            ),
            0.01,
            true,
        );
        let res = InstrumentDerivative::from(cap).accept(&mut CashFlowEquivalentCalculator::new(&p));
        assert!(matches!(res, Err(irmc_core::Error::UnsupportedInstrument { .. })));
    }
}
