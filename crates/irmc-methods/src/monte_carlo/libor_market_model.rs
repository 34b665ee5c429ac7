//! Monte Carlo under the displaced-diffusion Libor Market Model.
//!
//! Forward rates on the model grid `t_0 < … < t_N` are simulated under the
//! terminal measure (numeraire `P(·, t_N)`). Each step `[s₀, s₁]` moves the
//! rates still alive (`t_k ≥ s₁ − tol`) with a predictor-corrector drift:
//!
//! ```text
//! m     = ∫ e^{2a·u} du over [s₀, s₁]
//! c_kl  = m · Σ_f γ_kf·γ_lf
//! μ_k   = −Σ_{l>k} c_kl · δ_l (F_l + d_l) / (1 + δ_l F_l)
//! F_k  ← (F_k + d_k) · exp(½(μ_k^pred + μ_k^corr) − c_kk/2 + √m Σ_f γ_kf Z_f) − d_k
//! ```
//!
//! The predictor drift uses the rates at `s₀`; the corrector runs from the
//! longest rate down and uses the already corrected longer rates.

use super::data_bundle::MonteCarloIborRateDataBundle;
use super::decision_schedule_calculator::DecisionScheduleCalculator;
use super::ibor_rate_calculator::MonteCarloIborRateCalculator;
use super::method::{MonteCarloConfig, MonteCarloMethod};
use irmc_core::{errors::Result, Currency, CurrencyAmount, Real, Time};
use irmc_instruments::InstrumentDerivative;
use irmc_math::RandomNumberGenerator;
use irmc_models::{LiborMarketModelDisplacedDiffusionParameters, LiborMarketModelDisplacedDiffusionProvider};
use tracing::{debug, trace};

/// Mean reversions below this integrate the variance without the
/// exponential weight.
const MEAN_REVERSION_EPSILON: Real = 1.0e-12;

/// Displaced-diffusion LMM Monte Carlo pricer.
#[derive(Debug, Clone)]
pub struct LiborMarketModelMonteCarloMethod<R> {
    method: MonteCarloMethod<R>,
}

impl<R: RandomNumberGenerator> LiborMarketModelMonteCarloMethod<R> {
    /// Pricer drawing `nb_path` paths from `rng` with the default
    /// configuration.
    pub fn new(rng: R, nb_path: usize) -> Self {
        Self {
            method: MonteCarloMethod::new(rng, nb_path),
        }
    }

    /// Pricer with an explicit configuration; `max_jump` bounds the
    /// length of a single evolution step.
    pub fn with_config(rng: R, nb_path: usize, config: MonteCarloConfig) -> Result<Self> {
        Ok(Self {
            method: MonteCarloMethod::with_config(rng, nb_path, config)?,
        })
    }

    /// Shared Monte Carlo settings.
    pub fn method(&self) -> &MonteCarloMethod<R> {
        &self.method
    }

    /// Present value of a cap/floor, physical or cash swaption, or ratchet
    /// annuity.
    pub fn present_value(
        &mut self,
        instrument: &InstrumentDerivative,
        currency: &Currency,
        provider: &LiborMarketModelDisplacedDiffusionProvider,
    ) -> Result<CurrencyAmount> {
        let multicurve = provider.multicurve();
        let parameters = provider.parameters();
        let schedule = instrument.accept(&mut DecisionScheduleCalculator::new(multicurve))?;
        let ibor_time = parameters.ibor_time();
        let delta = parameters.accrual_factor();
        let nb_period = parameters.nb_period();

        let discount = ibor_time
            .iter()
            .map(|&t| multicurve.discount_factor(currency, t))
            .collect::<Result<Vec<Real>>>()?;
        let initial_rate: Vec<Real> = (0..nb_period)
            .map(|k| (discount[k] / discount[k + 1] - 1.0) / delta[k])
            .collect();
        let numeraire_discount_factor = discount[nb_period];
        let impact_index: Vec<Vec<usize>> = schedule
            .impact_time()
            .iter()
            .map(|times| times.iter().map(|&t| parameters.time_index(t)).collect())
            .collect();

        let steps = evolution_steps(schedule.decision_time(), self.method.config().max_jump);
        let blocks = self.method.block_sizes()?;
        debug!(
            instrument = instrument.name(),
            nb_decision = schedule.nb_decision(),
            nb_period,
            nb_factor = parameters.nb_factor(),
            nb_step = steps.iter().map(Vec::len).sum::<usize>(),
            nb_block = blocks.len(),
            "LMM Monte Carlo present value"
        );

        let mut sum = 0.0;
        for nb_block_path in blocks {
            let mut rates: Vec<Vec<Real>> =
                initial_rate.iter().map(|&f| vec![f; nb_block_path]).collect();
            let mut path_ibor_rate = Vec::with_capacity(schedule.nb_decision());
            for decision_steps in &steps {
                for &(s0, s1) in decision_steps {
                    let z = self.method.normal_array(parameters.nb_factor(), nb_block_path);
                    rates = evolve(&rates, s0, s1, &z, parameters);
                }
                path_ibor_rate.push(rates.clone());
            }
            let bundle = MonteCarloIborRateDataBundle::new(
                path_ibor_rate,
                delta.to_vec(),
                schedule.impact_amount().to_vec(),
                impact_index.clone(),
            )?;
            let block_sum = instrument.accept(&mut MonteCarloIborRateCalculator::new(&bundle))?;
            trace!(nb_block_path, block_sum, "block done");
            sum += block_sum;
        }
        let price = sum * numeraire_discount_factor / self.method.nb_path() as Real;
        Ok(CurrencyAmount::new(currency.clone(), price))
    }
}

// ─── Evolution ────────────────────────────────────────────────────────────────

/// Sub-steps `(s₀, s₁)` leading to each decision time, starting from 0.
///
/// A decision no later than the previous one gets no step and reuses the
/// rates already simulated.
fn evolution_steps(decision_time: &[Time], max_jump: Time) -> Vec<Vec<(Time, Time)>> {
    let mut previous = 0.0;
    decision_time
        .iter()
        .map(|&theta| {
            let length = theta - previous;
            if length <= 0.0 {
                return Vec::new();
            }
            let nb_step = (length / max_jump).ceil().max(1.0) as usize;
            let dt = length / nb_step as Real;
            let start = previous;
            previous = theta;
            (0..nb_step)
                .map(|i| {
                    let s1 = if i + 1 == nb_step { theta } else { start + (i + 1) as Real * dt };
                    (start + i as Real * dt, s1)
                })
                .collect()
        })
        .collect()
}

/// `∫ e^{2a·u} du` over `[s0, s1]`.
fn variance_weight(a: Real, s0: Time, s1: Time) -> Real {
    if a.abs() < MEAN_REVERSION_EPSILON {
        s1 - s0
    } else {
        ((2.0 * a * s1).exp() - (2.0 * a * s0).exp()) / (2.0 * a)
    }
}

/// Rates `[period][path]` after one step from `s0` to `s1` driven by the
/// normals `z[factor][path]`. Rates fixed before `s1` are left unchanged.
fn evolve(
    rates: &[Vec<Real>],
    s0: Time,
    s1: Time,
    z: &[Vec<Real>],
    parameters: &LiborMarketModelDisplacedDiffusionParameters,
) -> Vec<Vec<Real>> {
    let ibor_time = parameters.ibor_time();
    let nb_period = parameters.nb_period();
    let Some(first) = (0..nb_period).find(|&k| ibor_time[k] >= s1 - parameters.time_tolerance()) else {
        return rates.to_vec();
    };
    let delta = parameters.accrual_factor();
    let displacement = parameters.displacement();
    let gamma = parameters.volatility();
    let m = variance_weight(parameters.mean_reversion(), s0, s1);
    let sqrt_m = m.sqrt();
    let alive = first..nb_period;
    let cov: Vec<Vec<Real>> = alive
        .clone()
        .map(|k| {
            alive
                .clone()
                .map(|l| m * gamma[k].iter().zip(&gamma[l]).map(|(gk, gl)| gk * gl).sum::<Real>())
                .collect()
        })
        .collect();
    let drift_term = |l: usize, f: Real| delta[l] * (f + displacement[l]) / (1.0 + delta[l] * f);

    let mut next = rates.to_vec();
    let nb_path = rates.first().map_or(0, Vec::len);
    let nb_alive = nb_period - first;
    let mut start_term = vec![0.0; nb_alive];
    let mut end_term = vec![0.0; nb_alive];
    for path in 0..nb_path {
        for (i, term) in start_term.iter_mut().enumerate() {
            *term = drift_term(first + i, rates[first + i][path]);
        }
        for i in (0..nb_alive).rev() {
            let k = first + i;
            let c = &cov[i];
            let mu_pred: Real = -(i + 1..nb_alive).map(|l| c[l] * start_term[l]).sum::<Real>();
            let mu_corr: Real = -(i + 1..nb_alive).map(|l| c[l] * end_term[l]).sum::<Real>();
            let dw: Real = sqrt_m * gamma[k].iter().zip(z).map(|(g, zf)| g * zf[path]).sum::<Real>();
            let shifted = rates[k][path] + displacement[k];
            let f = shifted * (0.5 * (mu_pred + mu_corr) - 0.5 * c[i] + dw).exp() - displacement[k];
            next[k][path] = f;
            end_term[i] = drift_term(k, f);
        }
    }
    next
}
