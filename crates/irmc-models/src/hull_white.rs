//! Hull-White one-factor model with piecewise-constant volatility.
//!
//! ```text
//! dr = (θ(t) − a·r) dt + σ(t) dW
//! ```
//!
//! `θ(t)` fits the initial curve, so pricing only needs the volatility
//! kernels below. With `X` standard normal, the bond price ratio at
//! `θ` under the `u`-forward measure reads
//! `P(θ, v)/P(θ, u) = P(0, v)/P(0, u) · exp(−α·X − α²/2)` with
//! `α = alpha(0, θ, u, v)`.

use crate::volatility_grid::{exponential_integral, maturity_factor, VolatilityGrid};
use irmc_core::{errors::Result, Real, Time, Volatility};

/// Hull-White one-factor parameters: mean reversion `a` and volatilities
/// `σ_i` constant between successive volatility times.
#[derive(Debug, Clone, PartialEq)]
pub struct HullWhiteOneFactorPiecewiseConstantParameters {
    mean_reversion: Real,
    volatility: Vec<Volatility>,
    grid: VolatilityGrid,
}

impl HullWhiteOneFactorPiecewiseConstantParameters {
    /// Create the parameters.
    ///
    /// # Arguments
    /// * `mean_reversion` — `a`
    /// * `volatility` — `σ_0, …, σ_{n-1}`
    /// * `volatility_time` — the `n - 1` strictly increasing positive times
    ///   at which the volatility changes
    pub fn new(
        mean_reversion: Real,
        volatility: Vec<Volatility>,
        volatility_time: &[Time],
    ) -> Result<Self> {
        irmc_core::ensure!(
            volatility.iter().all(|s| *s >= 0.0),
            "volatilities must be non-negative"
        );
        let grid = VolatilityGrid::new(volatility_time, volatility.len())?;
        Ok(Self {
            mean_reversion,
            volatility,
            grid,
        })
    }

    /// Parameters with a single volatility level.
    pub fn constant(mean_reversion: Real, volatility: Volatility) -> Result<Self> {
        Self::new(mean_reversion, vec![volatility], &[])
    }

    /// Mean reversion `a`.
    pub fn mean_reversion(&self) -> Real {
        self.mean_reversion
    }

    /// Volatility levels.
    pub fn volatility(&self) -> &[Volatility] {
        &self.volatility
    }

    /// Volatility grid, starting at 0 and ending at a large sentinel.
    pub fn volatility_time(&self) -> &[Time] {
        self.grid.times()
    }

    /// `Σ σ_i² (e^{2a s_{i+1}} − e^{2a s_i})` over the pieces of
    /// `[theta0, theta1]`.
    pub fn gamma(&self, theta0: Time, theta1: Time) -> Real {
        2.0 * self.mean_reversion * self.integrated_variance(theta0, theta1)
    }

    /// `sqrt(gamma / 2a)`: standard deviation of the model state accumulated
    /// over `[theta0, theta1]`.
    pub fn beta(&self, theta0: Time, theta1: Time) -> Real {
        self.integrated_variance(theta0, theta1).sqrt()
    }

    /// `(e^{−a u} − e^{−a v})/a · beta(theta0, theta1)`: the volatility of
    /// `ln P(·, v)/P(·, u)` accumulated over `[theta0, theta1]`.
    pub fn alpha(&self, theta0: Time, theta1: Time, u: Time, v: Time) -> Real {
        maturity_factor(self.mean_reversion, u, v) * self.beta(theta0, theta1)
    }

    /// `(e^{−a u} − e^{−a v})/a` for every entry of `v`.
    pub fn volatility_maturity_part(&self, u: Time, v: &[Vec<Time>]) -> Vec<Vec<Real>> {
        v.iter()
            .map(|row| {
                row.iter()
                    .map(|&t| maturity_factor(self.mean_reversion, u, t))
                    .collect()
            })
            .collect()
    }

    fn integrated_variance(&self, theta0: Time, theta1: Time) -> Real {
        let k = 2.0 * self.mean_reversion;
        self.grid
            .segments(theta0, theta1)
            .into_iter()
            .map(|(i, lo, hi)| self.volatility[i].powi(2) * exponential_integral(k, lo, hi))
            .sum()
    }
}
