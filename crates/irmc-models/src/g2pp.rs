//! G2++ two-factor Gaussian short-rate model with piecewise-constant
//! volatilities.
//!
//! ```text
//! r(t) = x₀(t) + x₁(t) + φ(t)
//! dx_f = −a_f·x_f dt + σ_f(t) dW_f,    dW₀·dW₁ = ρ dt
//! ```

use crate::volatility_grid::{exponential_integral, maturity_factor, VolatilityGrid};
use irmc_core::{errors::Result, Real, Time, Volatility};

/// G2++ parameters: two mean reversions, two volatility vectors sharing
/// one change-time grid, and the factor correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct G2ppPiecewiseConstantParameters {
    mean_reversion: [Real; 2],
    volatility: [Vec<Volatility>; 2],
    correlation: Real,
    grid: VolatilityGrid,
}

impl G2ppPiecewiseConstantParameters {
    /// Create the parameters.
    pub fn new(
        mean_reversion: [Real; 2],
        volatility: [Vec<Volatility>; 2],
        volatility_time: &[Time],
        correlation: Real,
    ) -> Result<Self> {
        irmc_core::ensure!(
            volatility[0].len() == volatility[1].len(),
            "both factors need the same number of volatility levels"
        );
        irmc_core::ensure!(
            (-1.0..=1.0).contains(&correlation),
            "correlation must lie in [-1, 1], got {correlation}"
        );
        irmc_core::ensure!(
            volatility.iter().flatten().all(|s| *s >= 0.0),
            "volatilities must be non-negative"
        );
        let grid = VolatilityGrid::new(volatility_time, volatility[0].len())?;
        Ok(Self {
            mean_reversion,
            volatility,
            correlation,
            grid,
        })
    }

    /// Parameters with constant volatilities.
    pub fn constant(
        mean_reversion: [Real; 2],
        volatility: [Volatility; 2],
        correlation: Real,
    ) -> Result<Self> {
        Self::new(
            mean_reversion,
            [vec![volatility[0]], vec![volatility[1]]],
            &[],
            correlation,
        )
    }

    /// Mean reversions `[a₀, a₁]`.
    pub fn mean_reversion(&self) -> [Real; 2] {
        self.mean_reversion
    }

    /// Volatility levels of both factors.
    pub fn volatility(&self) -> &[Vec<Volatility>; 2] {
        &self.volatility
    }

    /// Correlation `ρ` between the factors.
    pub fn correlation(&self) -> Real {
        self.correlation
    }

    /// Volatility grid, starting at 0 and ending at a large sentinel.
    pub fn volatility_time(&self) -> &[Time] {
        self.grid.times()
    }

    /// `γ_fg = Σ σ_f,i σ_g,i (e^{(a_f+a_g)s_{i+1}} − e^{(a_f+a_g)s_i})/(a_f+a_g)`
    /// over the pieces of `[theta0, theta1]`. The correlation is not included.
    pub fn gamma(&self, theta0: Time, theta1: Time) -> [[Real; 2]; 2] {
        let segments = self.grid.segments(theta0, theta1);
        let mut gamma = [[0.0; 2]; 2];
        for f in 0..2 {
            for g in f..2 {
                let k = self.mean_reversion[f] + self.mean_reversion[g];
                let value: Real = segments
                    .iter()
                    .map(|&(i, lo, hi)| {
                        self.volatility[f][i] * self.volatility[g][i] * exponential_integral(k, lo, hi)
                    })
                    .sum();
                gamma[f][g] = value;
                gamma[g][f] = value;
            }
        }
        gamma
    }

    /// `H_f = (e^{−a_f u} − e^{−a_f v})/a_f` for each factor and each entry
    /// of `v`, indexed `[factor][row][column]`.
    pub fn volatility_maturity_part(&self, u: Time, v: &[Vec<Time>]) -> [Vec<Vec<Real>>; 2] {
        let part = |a: Real| -> Vec<Vec<Real>> {
            v.iter()
                .map(|row| row.iter().map(|&t| maturity_factor(a, u, t)).collect())
                .collect()
        };
        [part(self.mean_reversion[0]), part(self.mean_reversion[1])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gamma_constant_volatility() {
        let g2 = G2ppPiecewiseConstantParameters::constant([0.1, 0.3], [0.01, 0.005], -0.4).unwrap();
        let gamma = g2.gamma(0.0, 2.0);
        let e = |k: Real| ((k * 2.0).exp() - 1.0) / k;
        assert_relative_eq!(gamma[0][0], 1e-4 * e(0.2), epsilon = 1e-15);
        assert_relative_eq!(gamma[1][1], 2.5e-5 * e(0.6), epsilon = 1e-15);
        assert_relative_eq!(gamma[0][1], 5e-5 * e(0.4), epsilon = 1e-15);
        assert_eq!(gamma[0][1], gamma[1][0]);
    }

    #[test]
    fn maturity_part_per_factor() {
        let g2 = G2ppPiecewiseConstantParameters::constant([0.1, 0.3], [0.01, 0.005], 0.0).unwrap();
        let h = g2.volatility_maturity_part(1.0, &[vec![1.0, 2.0]]);
        assert_relative_eq!(h[0][0][0], 0.0);
        assert_relative_eq!(h[0][0][1], ((-0.1_f64).exp() - (-0.2_f64).exp()) / 0.1, epsilon = 1e-15);
        assert_relative_eq!(h[1][0][1], ((-0.3_f64).exp() - (-0.6_f64).exp()) / 0.3, epsilon = 1e-15);
    }

    #[test]
    fn invalid_parameters() {
        assert!(G2ppPiecewiseConstantParameters::constant([0.1, 0.2], [0.01, 0.01], 1.5).is_err());
        assert!(G2ppPiecewiseConstantParameters::new(
            [0.1, 0.2],
            [vec![0.01, 0.02], vec![0.01]],
            &[1.0],
            0.0
        )
        .is_err());
    }
}
