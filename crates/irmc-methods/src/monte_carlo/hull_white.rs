//! Monte Carlo under the Hull-White one-factor model.
//!
//! Discount factors are simulated exactly under the forward measure of the
//! last decision time `θ_N`. With `X_j` the model state at decision `j`
//! (`Var X_j = γ_j`, `Cov(X_i, X_j) = γ_min(i,j)`):
//!
//! ```text
//! P(θ_j, t) / P(θ_j, θ_N) = P(0, t)/P(0, θ_N) · exp(−H·X_j − H²/2·γ_j)
//! H = (e^{−a θ_N} − e^{−a t}) / a
//! ```
//!
//! The curve sensitivity is computed by a reverse sweep fused with the
//! forward simulation block by block.

use super::data_bundle::{MonteCarloDiscountFactorDataBundle, MonteCarloDiscountFactorDerivativeDataBundle};
use super::decision_schedule::DecisionSchedule;
use super::decision_schedule_calculator::DecisionScheduleCalculator;
use super::decision_schedule_derivative_calculator::DecisionScheduleDerivativeCalculator;
use super::discount_factor_calculator::MonteCarloDiscountFactorCalculator;
use super::discount_factor_derivative_calculator::MonteCarloDiscountFactorDerivativeCalculator;
use super::method::{MonteCarloConfig, MonteCarloMethod};
use irmc_core::{errors::Result, Currency, CurrencyAmount, Real, Time};
use irmc_instruments::InstrumentDerivative;
use irmc_math::{cholesky_decomposition_stripped, Matrix, RandomNumberGenerator};
use irmc_models::{HullWhiteOneFactorPiecewiseConstantParameters, HullWhiteOneFactorProvider};
use irmc_termstructures::{MulticurveProvider, MulticurveSensitivity};
use tracing::{debug, trace};

/// Point sensitivities closer than this are merged in the result.
const SENSITIVITY_TIME_TOLERANCE: Time = 1.0e-10;

/// Hull-White one-factor Monte Carlo pricer.
#[derive(Debug, Clone)]
pub struct HullWhiteMonteCarloMethod<R> {
    method: MonteCarloMethod<R>,
}

impl<R: RandomNumberGenerator> HullWhiteMonteCarloMethod<R> {
    /// Pricer drawing `nb_path` paths from `rng` with the default
    /// configuration.
    pub fn new(rng: R, nb_path: usize) -> Self {
        Self {
            method: MonteCarloMethod::new(rng, nb_path),
        }
    }

    /// Pricer with an explicit configuration.
    pub fn with_config(rng: R, nb_path: usize, config: MonteCarloConfig) -> Result<Self> {
        Ok(Self {
            method: MonteCarloMethod::with_config(rng, nb_path, config)?,
        })
    }

    /// Shared Monte Carlo settings.
    pub fn method(&self) -> &MonteCarloMethod<R> {
        &self.method
    }

    /// Present value of a cap/floor, physical or cash swaption.
    pub fn present_value(
        &mut self,
        instrument: &InstrumentDerivative,
        currency: &Currency,
        provider: &HullWhiteOneFactorProvider,
    ) -> Result<CurrencyAmount> {
        let multicurve = provider.multicurve();
        let schedule = instrument.accept(&mut DecisionScheduleCalculator::new(multicurve))?;
        let paths = HullWhitePaths::new(
            &schedule,
            provider.parameters(),
            multicurve,
            currency,
            self.method.config().zero_variance_threshold,
        )?;
        let blocks = self.method.block_sizes()?;
        debug!(
            instrument = instrument.name(),
            nb_decision = schedule.nb_decision(),
            nb_block = blocks.len(),
            nb_stripped = paths.nb_stripped,
            "Hull-White Monte Carlo present value"
        );
        let mut sum = 0.0;
        for nb_block_path in blocks {
            let x = self.method.normal_array(schedule.nb_decision(), nb_block_path);
            let y = paths.correlate(&x);
            let bundle = MonteCarloDiscountFactorDataBundle::new(
                paths.discount_factors(&y),
                schedule.impact_amount().to_vec(),
            )?;
            let block_sum = instrument.accept(&mut MonteCarloDiscountFactorCalculator::new(&bundle))?;
            trace!(nb_block_path, block_sum, "block done");
            sum += block_sum;
        }
        let price = sum * paths.numeraire_discount_factor / self.method.nb_path() as Real;
        Ok(CurrencyAmount::new(currency.clone(), price))
    }

    /// Sensitivity of the present value of a cap/floor or physical swaption
    /// to the zero rates of the discounting and forward curves.
    pub fn present_value_curve_sensitivity(
        &mut self,
        instrument: &InstrumentDerivative,
        currency: &Currency,
        provider: &HullWhiteOneFactorProvider,
    ) -> Result<MulticurveSensitivity> {
        let multicurve = provider.multicurve();
        let derivative = instrument.accept(&mut DecisionScheduleDerivativeCalculator::new(multicurve))?;
        let schedule = derivative.schedule();
        let paths = HullWhitePaths::new(
            schedule,
            provider.parameters(),
            multicurve,
            currency,
            self.method.config().zero_variance_threshold,
        )?;
        let blocks = self.method.block_sizes()?;
        debug!(
            instrument = instrument.name(),
            nb_decision = schedule.nb_decision(),
            nb_block = blocks.len(),
            "Hull-White Monte Carlo curve sensitivity"
        );
        let zeros = || -> Vec<Vec<Real>> {
            schedule
                .impact_amount()
                .iter()
                .map(|row| vec![0.0; row.len()])
                .collect()
        };
        let mut sum = 0.0;
        let mut initial_bar = zeros();
        let mut amount_bar = zeros();
        for nb_block_path in blocks {
            let x = self.method.normal_array(schedule.nb_decision(), nb_block_path);
            let y = paths.correlate(&x);
            let mut bundle = MonteCarloDiscountFactorDerivativeDataBundle::new(
                paths.discount_factors(&y),
                schedule.impact_amount().to_vec(),
            )?;
            sum += instrument.accept(&mut MonteCarloDiscountFactorDerivativeCalculator::new(&mut bundle))?;
            // Backward sweep of the block: pD = pD_init · exp(−H·y − H²/2·γ).
            for (path, path_bar) in bundle.path_discount_factor_derivative.iter().enumerate() {
                for (j, row_bar) in path_bar.iter().enumerate() {
                    for (cf, d_bar) in row_bar.iter().enumerate() {
                        initial_bar[j][cf] += d_bar * paths.exp_factor(j, cf, y[j][path]);
                    }
                }
            }
            for (acc, block) in amount_bar.iter_mut().zip(&bundle.impact_amount_derivative) {
                for (a, b) in acc.iter_mut().zip(block) {
                    *a += b;
                }
            }
        }

        // price = sum · P(θ_N) / nb_path, seeded with a unit adjoint.
        let nb_path = self.method.nb_path() as Real;
        let numeraire_df = paths.numeraire_discount_factor;
        let sum_bar = numeraire_df / nb_path;
        let mut numeraire_bar = sum / nb_path;
        let mut points = Vec::new();
        for (j, times) in schedule.impact_time().iter().enumerate() {
            for (cf, &t) in times.iter().enumerate() {
                let init_bar = initial_bar[j][cf] * sum_bar;
                // pD_init = P(t) / P(θ_N)
                numeraire_bar -= init_bar * paths.initial[j][cf] / numeraire_df;
                let df = paths.initial[j][cf] * numeraire_df;
                let df_bar = init_bar / numeraire_df;
                points.push((t, -t * df * df_bar));
            }
        }
        let numeraire_time = schedule.numeraire_time();
        points.push((numeraire_time, -numeraire_time * numeraire_df * numeraire_bar));

        let mut sensitivity =
            MulticurveSensitivity::of(multicurve.discounting_curve_name(currency)?, points);
        for (sensis, bars) in derivative.impact_amount_derivative().iter().zip(&amount_bar) {
            for (sensi, bar) in sensis.iter().zip(bars) {
                sensitivity += &sensi.multiplied_by(bar * sum_bar);
            }
        }
        Ok(sensitivity.cleaned(SENSITIVITY_TIME_TOLERANCE))
    }
}

// ─── Path generation ──────────────────────────────────────────────────────────

/// Call-scoped quantities of the one-factor simulation.
struct HullWhitePaths {
    /// Rebased initial discount factors `P(t)/P(θ_N)`, `[decision][impact]`.
    initial: Vec<Vec<Real>>,
    numeraire_discount_factor: Real,
    /// `H[j][cf]`.
    h: Vec<Vec<Real>>,
    /// `H²/2 · γ_j`.
    h2_gamma: Vec<Vec<Real>>,
    /// Lower Cholesky factor of `γ_min(i,j)`.
    factor: Matrix,
    nb_stripped: usize,
}

impl HullWhitePaths {
    fn new(
        schedule: &DecisionSchedule,
        parameters: &HullWhiteOneFactorPiecewiseConstantParameters,
        multicurve: &dyn MulticurveProvider,
        currency: &Currency,
        zero_variance_threshold: Real,
    ) -> Result<Self> {
        let numeraire_time = schedule.numeraire_time();
        let numeraire_discount_factor = multicurve.discount_factor(currency, numeraire_time)?;
        let initial = schedule
            .impact_time()
            .iter()
            .map(|times| {
                times
                    .iter()
                    .map(|&t| Ok(multicurve.discount_factor(currency, t)? / numeraire_discount_factor))
                    .collect::<Result<Vec<Real>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let gamma: Vec<Real> = schedule
            .decision_time()
            .iter()
            .map(|&theta| parameters.beta(0.0, theta).powi(2))
            .collect();
        let nb_decision = gamma.len();
        let covariance = Matrix::from_fn(nb_decision, nb_decision, |i, j| gamma[i.min(j)]);
        let stripped = cholesky_decomposition_stripped(&covariance, zero_variance_threshold)?;
        let h = parameters.volatility_maturity_part(numeraire_time, schedule.impact_time());
        let h2_gamma = h
            .iter()
            .zip(&gamma)
            .map(|(row, g)| row.iter().map(|h| h * h / 2.0 * g).collect())
            .collect();
        Ok(Self {
            initial,
            numeraire_discount_factor,
            h,
            h2_gamma,
            factor: stripped.factor,
            nb_stripped: stripped.nb_zero,
        })
    }

    /// `y = L·x`, indexed `[decision][path]`.
    fn correlate(&self, x: &[Vec<Real>]) -> Vec<Vec<Real>> {
        self.factor.lower_triangular_apply(x)
    }

    /// `exp(−H·y − H²/2·γ_j)` for one impact.
    fn exp_factor(&self, j: usize, cf: usize, y: Real) -> Real {
        (-self.h[j][cf] * y - self.h2_gamma[j][cf]).exp()
    }

    /// Simulated rebased discount factors `[path][decision][impact]`.
    fn discount_factors(&self, y: &[Vec<Real>]) -> Vec<Vec<Vec<Real>>> {
        let nb_path = y.first().map_or(0, Vec::len);
        (0..nb_path)
            .map(|path| {
                self.initial
                    .iter()
                    .enumerate()
                    .map(|(j, row)| {
                        row.iter()
                            .enumerate()
                            .map(|(cf, p)| p * self.exp_factor(j, cf, y[j][path]))
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn correlated_draws_follow_factor() {
        let paths = HullWhitePaths {
            initial: vec![vec![1.0]; 2],
            numeraire_discount_factor: 1.0,
            h: vec![vec![0.0]; 2],
            h2_gamma: vec![vec![0.0]; 2],
            factor: Matrix::from_row_slice(2, 2, &[0.0, 0.0, 0.5, 2.0]),
            nb_stripped: 1,
        };
        let y = paths.correlate(&[vec![1.0, -1.0], vec![0.5, 0.25]]);
        assert_eq!(y[0], vec![0.0, 0.0]);
        assert_relative_eq!(y[1][0], 1.5);
        assert_relative_eq!(y[1][1], 0.0);
        let pd = paths.discount_factors(&y);
        assert_eq!(pd.len(), 2);
        assert_eq!(pd[0], vec![vec![1.0], vec![1.0]]);
    }
}
