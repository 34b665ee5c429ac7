//! Instrument → decision schedule.

use super::decision_schedule::DecisionSchedule;
use irmc_cashflows::{Coupon, Payment};
use irmc_core::{errors::Result, Real, Time};
use irmc_instruments::{
    ibor_beta, AnnuityCouponIborRatchet, CapFloorIbor, CashFlowEquivalentCalculator,
    InstrumentDerivativeVisitor, RatchetCoupon, SwaptionCashFixedIbor, SwaptionPhysicalFixedIbor,
};
use irmc_termstructures::MulticurveProvider;

/// Builds the decision schedule of swaptions, caps/floors and ratchet
/// annuities.
pub struct DecisionScheduleCalculator<'a> {
    multicurve: &'a dyn MulticurveProvider,
}

impl<'a> DecisionScheduleCalculator<'a> {
    /// Calculator on the given curves.
    pub fn new(multicurve: &'a dyn MulticurveProvider) -> Self {
        Self { multicurve }
    }
}

fn unzip(flows: Vec<(Time, Real)>) -> (Vec<Time>, Vec<Real>) {
    flows.into_iter().unzip()
}

impl InstrumentDerivativeVisitor for DecisionScheduleCalculator<'_> {
    type Output = DecisionSchedule;
    const NAME: &'static str = "DecisionScheduleCalculator";

    fn visit_swaption_physical_fixed_ibor(
        &mut self,
        swaption: &SwaptionPhysicalFixedIbor,
    ) -> Result<DecisionSchedule> {
        let cfe = CashFlowEquivalentCalculator::new(self.multicurve);
        let (times, amounts) = unzip(cfe.swap_flows(swaption.underlying())?);
        DecisionSchedule::new(vec![swaption.time_to_expiry()], vec![times], vec![amounts])
    }

    /// Impacts: fixed payment times with `|N|·δ`, then the cash-flow
    /// equivalent of the Ibor leg on a positive notional, then the
    /// settlement time with amount 1.
    fn visit_swaption_cash_fixed_ibor(
        &mut self,
        swaption: &SwaptionCashFixedIbor,
    ) -> Result<DecisionSchedule> {
        let swap = swaption.underlying();
        let mut flows: Vec<(Time, Real)> = swap
            .fixed_leg()
            .iter()
            .map(|c| (c.payment_time(), c.notional().abs() * c.payment_year_fraction()))
            .collect();
        let cfe = CashFlowEquivalentCalculator::new(self.multicurve);
        let sign = if swap.ibor_leg().is_payer() { -1.0 } else { 1.0 };
        flows.extend(
            cfe.ibor_leg_flows(swap.ibor_leg())?
                .into_iter()
                .map(|(t, a)| (t, sign * a)),
        );
        flows.push((swaption.settlement_time(), 1.0));
        let (times, amounts) = unzip(flows);
        DecisionSchedule::new(vec![swaption.time_to_expiry()], vec![times], vec![amounts])
    }

    fn visit_cap_floor_ibor(&mut self, cap: &CapFloorIbor) -> Result<DecisionSchedule> {
        let coupon = cap.coupon();
        let beta = ibor_beta(self.multicurve, coupon)?;
        DecisionSchedule::new(
            vec![cap.fixing_time()],
            vec![vec![
                coupon.fixing_period_start_time(),
                coupon.fixing_period_end_time(),
                coupon.payment_time(),
            ]],
            vec![vec![beta, -1.0, 1.0]],
        )
    }

    fn visit_annuity_coupon_ibor_ratchet(
        &mut self,
        annuity: &AnnuityCouponIborRatchet,
    ) -> Result<DecisionSchedule> {
        let cfe = CashFlowEquivalentCalculator::new(self.multicurve);
        let nb = annuity.nb_payments();
        let mut decision_time = Vec::with_capacity(nb);
        let mut impact_time = Vec::with_capacity(nb);
        let mut impact_amount = Vec::with_capacity(nb);
        for coupon in annuity.coupons() {
            decision_time.push(coupon.decision_time());
            let flows = match coupon {
                RatchetCoupon::Fixed(c) => cfe.coupon_fixed_flows(c),
                RatchetCoupon::Gearing(c) => cfe.ibor_rate_flows(c.ibor(), 1.0)?,
                RatchetCoupon::Ratchet(c) => cfe.ibor_rate_flows(c.ibor(), 1.0)?,
            };
            let (times, amounts) = unzip(flows);
            impact_time.push(times);
            impact_amount.push(amounts);
        }
        DecisionSchedule::new(decision_time, impact_time, impact_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use irmc_cashflows::{
        fixed_leg, ibor_leg, CouponFixed, CouponIbor, CouponIborRatchet, LegSchedule,
        RatchetCoefficients,
    };
    use irmc_core::{Currency, IborIndex, Position};
    use irmc_instruments::{InstrumentDerivative, SwapFixedIbor};
    use irmc_termstructures::{MulticurveProviderDiscount, YieldCurve};

    fn curves() -> (MulticurveProviderDiscount, IborIndex) {
        let index = IborIndex::new("EURIBOR6M", Currency::eur());
        let p = MulticurveProviderDiscount::new()
            .with_discount_curve(Currency::eur(), YieldCurve::flat("EUR-DSC", 0.01).unwrap())
            .with_forward_curve(&index, YieldCurve::flat("EUR-FWD6M", 0.015).unwrap());
        (p, index)
    }

    fn swap(index: &IborIndex, payer: bool) -> SwapFixedIbor {
        let schedule = LegSchedule::new(2.0, 0.5, 6);
        SwapFixedIbor::new(
            fixed_leg(Currency::eur(), schedule, 100.0, 0.015, payer).unwrap(),
            ibor_leg(index, schedule, 100.0, !payer).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn physical_swaption_single_decision() {
        let (p, index) = curves();
        let swaption = SwaptionPhysicalFixedIbor::new(2.0, swap(&index, true), Position::Long).unwrap();
        let schedule = InstrumentDerivative::from(swaption)
            .accept(&mut DecisionScheduleCalculator::new(&p))
            .unwrap();
        assert_eq!(schedule.decision_time(), &[2.0]);
        assert_eq!(schedule.impact_time()[0].len(), 7);
        assert_eq!(schedule.impact_time()[0].len(), schedule.impact_amount()[0].len());
        assert_relative_eq!(schedule.impact_time()[0][0], 2.0);
    }

    #[test]
    fn cap_impact_triple() {
        let (p, index) = curves();
        let coupon = CouponIbor::new(Currency::eur(), 1.5, 0.5, 100.0, index.clone(), 1.0, 1.0, 1.5, 0.5);
        let cap = CapFloorIbor::new(coupon, 0.02, true);
        let schedule = InstrumentDerivative::from(cap)
            .accept(&mut DecisionScheduleCalculator::new(&p))
            .unwrap();
        assert_eq!(schedule.decision_time(), &[1.0]);
        assert_eq!(schedule.impact_time()[0], vec![1.0, 1.5, 1.5]);
        let f = p.simply_compounded_forward_rate(&index, 1.0, 1.5, 0.5).unwrap();
        let beta = (1.0 + 0.5 * f) * (-0.01_f64 * 0.5).exp();
        assert_relative_eq!(schedule.impact_amount()[0][0], beta, epsilon = 1e-14);
        assert_eq!(&schedule.impact_amount()[0][1..], &[-1.0, 1.0]);
    }

    #[test]
    fn cash_swaption_segments() {
        let (p, index) = curves();
        let swaption = SwaptionCashFixedIbor::new(2.0, swap(&index, false), 2.0, Position::Long).unwrap();
        let schedule = InstrumentDerivative::from(swaption)
            .accept(&mut DecisionScheduleCalculator::new(&p))
            .unwrap();
        let amounts = &schedule.impact_amount()[0];
        // 6 fixed, 7 merged floating equivalents, 1 settlement.
        assert_eq!(amounts.len(), 14);
        assert!(amounts[..6].iter().all(|a| (a - 50.0).abs() < 1e-12));
        // Receiver fixed pays the floating leg; amounts are normalised to a
        // positive notional: first flow positive, last negative.
        assert!(amounts[6] > 0.0);
        assert!(amounts[12] < 0.0);
        assert_eq!(amounts[13], 1.0);
        assert_eq!(schedule.impact_time()[0][13], 2.0);
    }

    #[test]
    fn ratchet_decisions() {
        let (p, index) = curves();
        let ibor = |s: Time| CouponIbor::new(Currency::eur(), s + 0.5, 0.5, 1.0, index.clone(), s, s, s + 0.5, 0.5);
        let c = RatchetCoefficients::new(0.0, 1.0, 0.0);
        let annuity = AnnuityCouponIborRatchet::new(vec![
            RatchetCoupon::Fixed(CouponFixed::new(Currency::eur(), 0.5, 0.5, 1.0, 0.01)),
            RatchetCoupon::Ratchet(CouponIborRatchet::new(ibor(0.5), c, c, c)),
            RatchetCoupon::Ratchet(CouponIborRatchet::new(ibor(1.0), c, c, c)),
        ])
        .unwrap();
        let schedule = InstrumentDerivative::from(annuity)
            .accept(&mut DecisionScheduleCalculator::new(&p))
            .unwrap();
        assert_eq!(schedule.decision_time(), &[0.0, 0.5, 1.0]);
        assert_eq!(schedule.impact_time()[0], vec![0.5]);
        assert_eq!(schedule.impact_time()[2], vec![1.0, 1.5]);
        assert_relative_eq!(schedule.impact_amount()[2][1], -1.0);
    }

    #[test]
    fn swap_is_unsupported() {
        let (p, index) = curves();
        let err = InstrumentDerivative::from(swap(&index, true))
            .accept(&mut DecisionScheduleCalculator::new(&p))
            .unwrap_err();
        assert_eq!(
            err,
            irmc_core::Error::unsupported("DecisionScheduleCalculator", "SwapFixedIbor")
        );
    }
}
