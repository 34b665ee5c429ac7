//! Monte Carlo under the G2++ two-factor model.
//!
//! The state at each decision is the pair `(y₀, y₁)` with covariance
//! `Cov(y_f(θ_i), y_g(θ_j)) = ρ_fg·γ_fg(0, θ_min(i,j))`. Rebased discount
//! factors follow
//!
//! ```text
//! pD = pD_init · exp(−H₀·y₀ − H₁·y₁ − τ²/2)
//! τ² = H₀²γ₀₀ + H₁²γ₁₁ + 2ρ·γ₀₁·H₀·H₁
//! ```

use super::data_bundle::MonteCarloDiscountFactorDataBundle;
use super::decision_schedule_calculator::DecisionScheduleCalculator;
use super::discount_factor_calculator::MonteCarloDiscountFactorCalculator;
use super::method::{MonteCarloConfig, MonteCarloMethod};
use irmc_core::{errors::Result, Currency, CurrencyAmount, Real};
use irmc_instruments::InstrumentDerivative;
use irmc_math::{cholesky_decomposition, Matrix, RandomNumberGenerator};
use irmc_models::G2ppProvider;
use tracing::{debug, trace};

/// G2++ Monte Carlo pricer.
#[derive(Debug, Clone)]
pub struct G2ppMonteCarloMethod<R> {
    method: MonteCarloMethod<R>,
}

impl<R: RandomNumberGenerator> G2ppMonteCarloMethod<R> {
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
        provider: &G2ppProvider,
    ) -> Result<CurrencyAmount> {
        let multicurve = provider.multicurve();
        let parameters = provider.parameters();
        let schedule = instrument.accept(&mut DecisionScheduleCalculator::new(multicurve))?;
        let decision_time = schedule.decision_time();
        let nb_decision = schedule.nb_decision();
        let numeraire_time = schedule.numeraire_time();
        let numeraire_df = multicurve.discount_factor(currency, numeraire_time)?;

        let initial = schedule
            .impact_time()
            .iter()
            .map(|times| {
                times
                    .iter()
                    .map(|&t| Ok(multicurve.discount_factor(currency, t)? / numeraire_df))
                    .collect::<Result<Vec<Real>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let gamma: Vec<[[Real; 2]; 2]> = decision_time
            .iter()
            .map(|&theta| parameters.gamma(0.0, theta))
            .collect();
        let rho = parameters.correlation();
        let factor = cholesky_decomposition(&covariance(&gamma, rho))?;

        let h = parameters.volatility_maturity_part(numeraire_time, schedule.impact_time());
        let tau2_half: Vec<Vec<Real>> = (0..nb_decision)
            .map(|j| {
                let g = &gamma[j];
                h[0][j]
                    .iter()
                    .zip(&h[1][j])
                    .map(|(h0, h1)| {
                        (h0 * h0 * g[0][0] + h1 * h1 * g[1][1] + 2.0 * rho * g[0][1] * h0 * h1) / 2.0
                    })
                    .collect()
            })
            .collect();

        let blocks = self.method.block_sizes()?;
        debug!(
            instrument = instrument.name(),
            nb_decision,
            nb_block = blocks.len(),
            "G2++ Monte Carlo present value"
        );
        let mut sum = 0.0;
        for nb_block_path in blocks {
            // Rows 0..J drive factor 0, rows J..2J factor 1.
            let x = self.method.normal_array(2 * nb_decision, nb_block_path);
            let y = factor.lower_triangular_apply(&x);
            let path_discount_factor: Vec<Vec<Vec<Real>>> = (0..nb_block_path)
                .map(|path| {
                    (0..nb_decision)
                        .map(|j| {
                            let (y0, y1) = (y[j][path], y[nb_decision + j][path]);
                            initial[j]
                                .iter()
                                .enumerate()
                                .map(|(cf, p)| {
                                    p * (-h[0][j][cf] * y0 - h[1][j][cf] * y1 - tau2_half[j][cf]).exp()
                                })
                                .collect()
                        })
                        .collect()
                })
                .collect();
            let bundle = MonteCarloDiscountFactorDataBundle::new(
                path_discount_factor,
                schedule.impact_amount().to_vec(),
            )?;
            let block_sum = instrument.accept(&mut MonteCarloDiscountFactorCalculator::new(&bundle))?;
            trace!(nb_block_path, block_sum, "block done");
            sum += block_sum;
        }
        let price = sum * numeraire_df / self.method.nb_path() as Real;
        Ok(CurrencyAmount::new(currency.clone(), price))
    }
}

/// `cov[f·J + i][g·J + j] = ρ_fg·γ_fg(0, θ_min(i,j))`.
fn covariance(gamma: &[[[Real; 2]; 2]], rho: Real) -> Matrix {
    let nb_decision = gamma.len();
    let correlation = [[1.0, rho], [rho, 1.0]];
    Matrix::from_fn(2 * nb_decision, 2 * nb_decision, |r, c| {
        let (f, i) = (r / nb_decision, r % nb_decision);
        let (g, j) = (c / nb_decision, c % nb_decision);
        correlation[f][g] * gamma[i.min(j)][f][g]
    })
}
