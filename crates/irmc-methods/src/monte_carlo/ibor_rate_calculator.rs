//! Payoffs on simulated forward rates (displaced-diffusion LMM).
//!
//! At each decision the rebased discount factors of the model grid are
//! rolled back from the numeraire `t_N` with the rates simulated at that
//! decision: `D_N = 1`, `D_k = D_{k+1}·(1 + δ_k·L_k)`.

use super::data_bundle::MonteCarloIborRateDataBundle;
use super::discount_factor_calculator::{cash_swaption_payoff, cash_swaption_split};
use irmc_core::{errors::Result, Real};
use irmc_cashflows::{Coupon, CouponIbor};
use irmc_instruments::{
    AnnuityCouponIborRatchet, CapFloorIbor, InstrumentDerivativeVisitor, RatchetCoupon,
    SwaptionCashFixedIbor, SwaptionPhysicalFixedIbor,
};

/// Sums path-wise payoffs over one block of simulated forward rates.
pub struct MonteCarloIborRateCalculator<'a> {
    bundle: &'a MonteCarloIborRateDataBundle,
}

impl<'a> MonteCarloIborRateCalculator<'a> {
    /// Calculator on one block of simulated rates.
    pub fn new(bundle: &'a MonteCarloIborRateDataBundle) -> Self {
        Self { bundle }
    }

    /// Rebased grid discount factors `D_0..=D_N` at decision `j` on `path`.
    fn grid_discount_factors(&self, j: usize, path: usize) -> Vec<Real> {
        let rates = &self.bundle.path_ibor_rate[j];
        let delta = &self.bundle.delta;
        let nb_period = delta.len();
        let mut d = vec![1.0; nb_period + 1];
        for k in (0..nb_period).rev() {
            d[k] = d[k + 1] * (1.0 + delta[k] * rates[k][path]);
        }
        d
    }

    /// Impact discount factors of decision `j` on `path`.
    fn impact_discount_factors(&self, j: usize, path: usize) -> Vec<Real> {
        let grid = self.grid_discount_factors(j, path);
        self.bundle.impact_index[j].iter().map(|&k| grid[k]).collect()
    }

    /// Ibor rate implied by the first two impacts `(start, a₀), (end, a₁)`.
    fn ibor(&self, j: usize, discount: &[Real], coupon: &CouponIbor) -> Real {
        let a = &self.bundle.impact_amount[j];
        (-a[0] * discount[0] / (a[1] * discount[1]) - 1.0) / coupon.fixing_accrual_factor()
    }
}

impl InstrumentDerivativeVisitor for MonteCarloIborRateCalculator<'_> {
    type Output = Real;
    const NAME: &'static str = "MonteCarloIborRateCalculator";

    fn visit_cap_floor_ibor(&mut self, cap: &CapFloorIbor) -> Result<Real> {
        let a = &self.bundle.impact_amount[0];
        irmc_core::ensure_shape!(a.len() == 3, "cap/floor expects 3 impacts, got {}", a.len());
        let omega = cap.omega();
        let mut sum = 0.0;
        for path in 0..self.bundle.nb_path() {
            let d = self.impact_discount_factors(0, path);
            let ibor = self.ibor(0, &d, cap.coupon());
            sum += (omega * (ibor - cap.strike())).max(0.0) * a[2] * d[2];
        }
        Ok(sum * cap.notional() * cap.payment_year_fraction())
    }

    fn visit_swaption_physical_fixed_ibor(&mut self, swaption: &SwaptionPhysicalFixedIbor) -> Result<Real> {
        let a = &self.bundle.impact_amount[0];
        let mut sum = 0.0;
        for path in 0..self.bundle.nb_path() {
            let d = self.impact_discount_factors(0, path);
            let value: Real = a.iter().zip(&d).map(|(a, d)| a * d).sum();
            sum += value.max(0.0);
        }
        Ok(sum * swaption.position().sign())
    }

    fn visit_swaption_cash_fixed_ibor(&mut self, swaption: &SwaptionCashFixedIbor) -> Result<Real> {
        let a = &self.bundle.impact_amount[0];
        let (nb_fixed, settlement) = cash_swaption_split(swaption, a.len())?;
        let mut sum = 0.0;
        for path in 0..self.bundle.nb_path() {
            let d = self.impact_discount_factors(0, path);
            sum += cash_swaption_payoff(swaption, a, &d, nb_fixed, settlement);
        }
        Ok(sum * swaption.position().sign())
    }

    fn visit_annuity_coupon_ibor_ratchet(&mut self, annuity: &AnnuityCouponIborRatchet) -> Result<Real> {
        let coupons = annuity.coupons();
        irmc_core::ensure_shape!(
            self.bundle.impact_amount.len() == coupons.nb_payments(),
            "ratchet annuity has {} coupons but the bundle {} decisions",
            coupons.nb_payments(),
            self.bundle.impact_amount.len()
        );
        let mut sum = 0.0;
        for path in 0..self.bundle.nb_path() {
            let mut previous = 0.0;
            for (j, coupon) in coupons.iter().enumerate() {
                let d = self.impact_discount_factors(j, path);
                let (rate, pay) = match coupon {
                    RatchetCoupon::Fixed(c) => (c.fixed_rate(), d[0]),
                    RatchetCoupon::Gearing(c) => {
                        let ibor = self.ibor(j, &d, c.ibor());
                        (c.gearing() * ibor + c.spread(), d[1])
                    }
                    RatchetCoupon::Ratchet(c) => {
                        let ibor = self.ibor(j, &d, c.ibor());
                        (c.rate(previous, ibor), d[1])
                    }
                };
                sum += rate * coupon.notional() * coupon.payment_year_fraction() * pay;
                previous = rate;
            }
        }
        Ok(sum)
    }
}
