//! Payoffs on simulated discount factors with their adjoints.
//!
//! Alongside the block's payoff sum the calculator fills, for a unit seed
//! on that sum, the adjoint of every simulated discount factor and of every
//! impact amount.

use super::data_bundle::MonteCarloDiscountFactorDerivativeDataBundle;
use irmc_core::{errors::Result, Real};
use irmc_instruments::{CapFloorIbor, InstrumentDerivativeVisitor, SwaptionPhysicalFixedIbor};

/// Payoff sum and adjoints of caps/floors and physical swaptions.
pub struct MonteCarloDiscountFactorDerivativeCalculator<'a> {
    bundle: &'a mut MonteCarloDiscountFactorDerivativeDataBundle,
}

impl<'a> MonteCarloDiscountFactorDerivativeCalculator<'a> {
    /// Calculator on one block; the bundle's adjoints are overwritten.
    pub fn new(bundle: &'a mut MonteCarloDiscountFactorDerivativeDataBundle) -> Self {
        Self { bundle }
    }
}

impl InstrumentDerivativeVisitor for MonteCarloDiscountFactorDerivativeCalculator<'_> {
    type Output = Real;
    const NAME: &'static str = "MonteCarloDiscountFactorDerivativeCalculator";

    fn visit_cap_floor_ibor(&mut self, cap: &CapFloorIbor) -> Result<Real> {
        let bundle = &mut *self.bundle;
        let a = bundle.impact_amount[0].clone();
        irmc_core::ensure_shape!(a.len() == 3, "cap/floor expects 3 impacts, got {}", a.len());
        let delta = cap.coupon().fixing_accrual_factor();
        let omega = cap.omega();
        let strike = cap.strike();
        let scale = cap.notional() * cap.payment_year_fraction();
        let mut sum = 0.0;
        let mut a_bar = [0.0; 3];
        for (d, d_bar) in bundle
            .path_discount_factor
            .iter()
            .zip(bundle.path_discount_factor_derivative.iter_mut())
        {
            let (d, d_bar) = (&d[0], &mut d_bar[0]);
            let ratio = -a[0] * d[0] / (a[1] * d[1]);
            let ibor = (ratio - 1.0) / delta;
            let intrinsic = omega * (ibor - strike);
            d_bar.iter_mut().for_each(|x| *x = 0.0);
            if intrinsic <= 0.0 {
                continue;
            }
            sum += intrinsic * a[2] * d[2];
            // Backward sweep of the path payoff.
            let payoff_bar = scale;
            let ibor_bar = omega * a[2] * d[2] * payoff_bar;
            let ratio_bar = ibor_bar / delta;
            d_bar[0] = ratio / d[0] * ratio_bar;
            d_bar[1] = -ratio / d[1] * ratio_bar;
            d_bar[2] = intrinsic * a[2] * payoff_bar;
            a_bar[0] += ratio / a[0] * ratio_bar;
            a_bar[1] += -ratio / a[1] * ratio_bar;
            a_bar[2] += intrinsic * d[2] * payoff_bar;
        }
        bundle.impact_amount_derivative[0].copy_from_slice(&a_bar);
        Ok(sum * scale)
    }

    fn visit_swaption_physical_fixed_ibor(&mut self, swaption: &SwaptionPhysicalFixedIbor) -> Result<Real> {
        let bundle = &mut *self.bundle;
        let a = &bundle.impact_amount[0];
        let sign = swaption.position().sign();
        let mut sum = 0.0;
        let mut a_bar = vec![0.0; a.len()];
        for (d, d_bar) in bundle
            .path_discount_factor
            .iter()
            .zip(bundle.path_discount_factor_derivative.iter_mut())
        {
            let (d, d_bar) = (&d[0], &mut d_bar[0]);
            let value: Real = a.iter().zip(d).map(|(a, d)| a * d).sum();
            if value > 0.0 {
                sum += value;
                for cf in 0..a.len() {
                    d_bar[cf] = sign * a[cf];
                    a_bar[cf] += sign * d[cf];
                }
            } else {
                d_bar.iter_mut().for_each(|x| *x = 0.0);
            }
        }
        bundle.impact_amount_derivative[0] = a_bar;
        Ok(sum * sign)
    }
}
