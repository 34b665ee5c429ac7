//! Displaced-diffusion Libor market model.
//!
//! Forward `F_k` covers `[t_k, t_{k+1}]` with accrual `δ_k` and
//! displacement `d_k`:
//!
//! ```text
//! d(F_k + d_k) = (F_k + d_k) · e^{a t} · Σ_f γ_kf dW_f
//! ```
//!
//! `γ` is an `N × F` matrix of factor loadings and `a` a common
//! mean-reversion-like time scaling.

use irmc_core::{errors::Result, Real, Time};

/// Default tolerance used to decide whether a forward has fixed.
pub const DEFAULT_TIME_TOLERANCE: Time = 1.0e-3;

/// Parameters of the displaced-diffusion LMM on a fixed Ibor grid.
#[derive(Debug, Clone, PartialEq)]
pub struct LiborMarketModelDisplacedDiffusionParameters {
    ibor_time: Vec<Time>,
    accrual_factor: Vec<Real>,
    displacement: Vec<Real>,
    volatility: Vec<Vec<Real>>,
    mean_reversion: Real,
    time_tolerance: Time,
}

impl LiborMarketModelDisplacedDiffusionParameters {
    /// Create the parameters.
    ///
    /// # Arguments
    /// * `ibor_time` — `N + 1` strictly increasing grid times
    /// * `accrual_factor` — `N` accrual factors
    /// * `displacement` — `N` displacements
    /// * `volatility` — `N` rows of `F` factor loadings
    /// * `mean_reversion` — the time scaling `a`
    pub fn new(
        ibor_time: Vec<Time>,
        accrual_factor: Vec<Real>,
        displacement: Vec<Real>,
        volatility: Vec<Vec<Real>>,
        mean_reversion: Real,
    ) -> Result<Self> {
        irmc_core::ensure!(ibor_time.len() >= 2, "the Ibor grid needs at least two times");
        let nb_period = ibor_time.len() - 1;
        irmc_core::ensure!(
            ibor_time.windows(2).all(|w| w[1] > w[0]),
            "Ibor times must be strictly increasing"
        );
        irmc_core::ensure_shape!(
            accrual_factor.len() == nb_period && displacement.len() == nb_period,
            "{nb_period} periods need {nb_period} accrual factors and displacements, got {} and {}",
            accrual_factor.len(),
            displacement.len()
        );
        irmc_core::ensure!(
            accrual_factor.iter().all(|d| *d > 0.0),
            "accrual factors must be positive"
        );
        irmc_core::ensure_shape!(
            volatility.len() == nb_period,
            "{nb_period} periods need {nb_period} volatility rows, got {}",
            volatility.len()
        );
        let nb_factor = volatility[0].len();
        irmc_core::ensure!(nb_factor >= 1, "at least one factor is required");
        irmc_core::ensure_shape!(
            volatility.iter().all(|row| row.len() == nb_factor),
            "every volatility row needs {nb_factor} factor loadings"
        );
        Ok(Self {
            ibor_time,
            accrual_factor,
            displacement,
            volatility,
            mean_reversion,
            time_tolerance: DEFAULT_TIME_TOLERANCE,
        })
    }

    /// Override the tolerance used to decide whether a forward has fixed.
    pub fn with_time_tolerance(mut self, tolerance: Time) -> Self {
        self.time_tolerance = tolerance;
        self
    }

    /// Grid times `t_0 < … < t_N`.
    pub fn ibor_time(&self) -> &[Time] {
        &self.ibor_time
    }

    /// Accrual factors `δ_k`.
    pub fn accrual_factor(&self) -> &[Real] {
        &self.accrual_factor
    }

    /// Displacements `d_k`.
    pub fn displacement(&self) -> &[Real] {
        &self.displacement
    }

    /// Factor loadings `γ_kf`.
    pub fn volatility(&self) -> &[Vec<Real>] {
        &self.volatility
    }

    /// Time scaling `a`.
    pub fn mean_reversion(&self) -> Real {
        self.mean_reversion
    }

    /// Tolerance on fixing times.
    pub fn time_tolerance(&self) -> Time {
        self.time_tolerance
    }

    /// Number of forward periods `N`.
    pub fn nb_period(&self) -> usize {
        self.accrual_factor.len()
    }

    /// Number of factors `F`.
    pub fn nb_factor(&self) -> usize {
        self.volatility[0].len()
    }

    /// Index of the grid time closest to `t`.
    pub fn time_index(&self, t: Time) -> usize {
        let mut best = 0;
        for (i, ti) in self.ibor_time.iter().enumerate() {
            if (ti - t).abs() < (self.ibor_time[best] - t).abs() {
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LiborMarketModelDisplacedDiffusionParameters {
        LiborMarketModelDisplacedDiffusionParameters::new(
            vec![0.5, 1.0, 1.5, 2.0],
            vec![0.5; 3],
            vec![0.05; 3],
            vec![vec![0.1, 0.02]; 3],
            0.0,
        )
        .unwrap()
    }

    #[test]
    fn closest_grid_index() {
        let p = params();
        assert_eq!(p.time_index(0.0), 0);
        assert_eq!(p.time_index(1.0), 1);
        assert_eq!(p.time_index(1.0 + 1e-9), 1);
        assert_eq!(p.time_index(1.4), 2);
        assert_eq!(p.time_index(10.0), 3);
        assert_eq!(p.nb_period(), 3);
        assert_eq!(p.nb_factor(), 2);
    }

    #[test]
    fn shape_checks() {
        let bad = LiborMarketModelDisplacedDiffusionParameters::new(
            vec![0.5, 1.0, 1.5],
            vec![0.5; 2],
            vec![0.0; 1],
            vec![vec![0.1]; 2],
            0.0,
        );
        assert!(matches!(bad, Err(irmc_core::Error::ShapeMismatch(_))));
        let ragged = LiborMarketModelDisplacedDiffusionParameters::new(
            vec![0.5, 1.0, 1.5],
            vec![0.5; 2],
            vec![0.0; 2],
            vec![vec![0.1], vec![0.1, 0.2]],
            0.0,
        );
        assert!(ragged.is_err());
    }
}
