//! Instrument → decision schedule with impact amount sensitivities.

use super::decision_schedule::{DecisionSchedule, DecisionScheduleDerivative};
use super::decision_schedule_calculator::DecisionScheduleCalculator;
use irmc_core::errors::Result;
use irmc_instruments::{
    ibor_beta_sensitivity, CapFloorIbor, CashFlowEquivalentCurveSensitivityCalculator,
    InstrumentDerivativeVisitor, SwaptionPhysicalFixedIbor,
};
use irmc_termstructures::{MulticurveProvider, MulticurveSensitivity};

/// Tolerance used to match impact times with sensitivity times.
const TIME_TOLERANCE: f64 = 1.0e-10;

/// Builds decision schedules with sensitivities for physical swaptions and
/// caps/floors.
pub struct DecisionScheduleDerivativeCalculator<'a> {
    multicurve: &'a dyn MulticurveProvider,
}

impl<'a> DecisionScheduleDerivativeCalculator<'a> {
    /// Calculator on the given curves.
    pub fn new(multicurve: &'a dyn MulticurveProvider) -> Self {
        Self { multicurve }
    }

    fn schedule(&self) -> DecisionScheduleCalculator<'a> {
        DecisionScheduleCalculator::new(self.multicurve)
    }
}

impl InstrumentDerivativeVisitor for DecisionScheduleDerivativeCalculator<'_> {
    type Output = DecisionScheduleDerivative;
    const NAME: &'static str = "DecisionScheduleDerivativeCalculator";

    fn visit_swaption_physical_fixed_ibor(
        &mut self,
        swaption: &SwaptionPhysicalFixedIbor,
    ) -> Result<DecisionScheduleDerivative> {
        let schedule: DecisionSchedule = self
            .schedule()
            .visit_swaption_physical_fixed_ibor(swaption)?;
        let sensitivities = CashFlowEquivalentCurveSensitivityCalculator::new(self.multicurve)
            .swap_sensitivities(swaption.underlying())?;
        let derivative = schedule.impact_time()[0]
            .iter()
            .map(|&t| {
                sensitivities
                    .iter()
                    .find(|(s, _)| (s - t).abs() < TIME_TOLERANCE)
                    .map(|(_, sensi)| sensi.clone())
                    .unwrap_or_default()
            })
            .collect();
        DecisionScheduleDerivative::new(schedule, vec![derivative])
    }

    fn visit_cap_floor_ibor(&mut self, cap: &CapFloorIbor) -> Result<DecisionScheduleDerivative> {
        let schedule = self.schedule().visit_cap_floor_ibor(cap)?;
        let beta = ibor_beta_sensitivity(self.multicurve, cap.coupon())?;
        DecisionScheduleDerivative::new(
            schedule,
            vec![vec![
                beta,
                MulticurveSensitivity::new(),
                MulticurveSensitivity::new(),
            ]],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use irmc_cashflows::{fixed_leg, ibor_leg, CouponIbor, LegSchedule};
    use irmc_core::{Currency, IborIndex, Position};
    use irmc_instruments::{InstrumentDerivative, SwapFixedIbor, SwaptionCashFixedIbor};
    use irmc_termstructures::{MulticurveProviderDiscount, YieldCurve};

    fn curves() -> (MulticurveProviderDiscount, IborIndex) {
        let index = IborIndex::new("EURIBOR6M", Currency::eur());
        let p = MulticurveProviderDiscount::new()
            .with_discount_curve(Currency::eur(), YieldCurve::flat("EUR-DSC", 0.01).unwrap())
            .with_forward_curve(&index, YieldCurve::flat("EUR-FWD6M", 0.015).unwrap());
        (p, index)
    }

    fn swap(index: &IborIndex) -> SwapFixedIbor {
        let schedule = LegSchedule::new(1.0, 0.5, 4);
        SwapFixedIbor::new(
            fixed_leg(Currency::eur(), schedule, 100.0, 0.015, true).unwrap(),
            ibor_leg(index, schedule, 100.0, false).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn swaption_derivatives_parallel_to_amounts() {
        let (p, index) = curves();
        let swaption = SwaptionPhysicalFixedIbor::new(1.0, swap(&index), Position::Long).unwrap();
        let d = InstrumentDerivative::from(swaption)
            .accept(&mut DecisionScheduleDerivativeCalculator::new(&p))
            .unwrap();
        assert_eq!(
            d.impact_amount_derivative()[0].len(),
            d.schedule().impact_amount()[0].len()
        );
        // The first flow carries the start-of-period beta sensitivity.
        assert!(d.impact_amount_derivative()[0][0].get("EUR-FWD6M").is_some());
        // The last flow is a pure fixed/notional amount.
        assert!(d.impact_amount_derivative()[0][4].is_empty());
    }

    #[test]
    fn cap_derivative_only_on_beta() {
        let (p, index) = curves();
        let coupon = CouponIbor::new(Currency::eur(), 1.5, 0.5, 1.0, index, 1.0, 1.0, 1.5, 0.5);
        let d = InstrumentDerivative::from(CapFloorIbor::new(coupon, 0.01, false))
            .accept(&mut DecisionScheduleDerivativeCalculator::new(&p))
            .unwrap();
        let row = &d.impact_amount_derivative()[0];
        assert!(!row[0].is_empty());
        assert!(row[1].is_empty() && row[2].is_empty());
    }

    #[test]
    fn cash_swaption_unsupported() {
        let (p, index) = curves();
        let swaption = SwaptionCashFixedIbor::new(1.0, swap(&index), 1.0, Position::Long).unwrap();
        let res = InstrumentDerivative::from(swaption)
            .accept(&mut DecisionScheduleDerivativeCalculator::new(&p));
        assert!(matches!(res, Err(irmc_core::Error::UnsupportedInstrument { .. })));
    }
}
