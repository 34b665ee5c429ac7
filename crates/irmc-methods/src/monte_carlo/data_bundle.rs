//! Per-block simulation outputs handed to the payoff calculators.

use irmc_core::{errors::Result, Real};

/// Simulated discount factors of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloDiscountFactorDataBundle {
    /// `[path][decision][impact]`, rebased to the numeraire time.
    pub path_discount_factor: Vec<Vec<Vec<Real>>>,
    /// `[decision][impact]` reference amounts of the schedule.
    pub impact_amount: Vec<Vec<Real>>,
}

impl MonteCarloDiscountFactorDataBundle {
    /// Create a bundle; every path must match the shape of `impact_amount`.
    pub fn new(path_discount_factor: Vec<Vec<Vec<Real>>>, impact_amount: Vec<Vec<Real>>) -> Result<Self> {
        check_paths(&path_discount_factor, &impact_amount)?;
        Ok(Self {
            path_discount_factor,
            impact_amount,
        })
    }

    /// Number of paths in the block.
    pub fn nb_path(&self) -> usize {
        self.path_discount_factor.len()
    }
}

/// Simulated discount factors of one block with room for the adjoints of
/// the block's payoff sum.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloDiscountFactorDerivativeDataBundle {
    /// `[path][decision][impact]`, rebased to the numeraire time.
    pub path_discount_factor: Vec<Vec<Vec<Real>>>,
    /// `[decision][impact]` reference amounts of the schedule.
    pub impact_amount: Vec<Vec<Real>>,
    /// Adjoint of each simulated discount factor, same shape as
    /// `path_discount_factor`.
    pub path_discount_factor_derivative: Vec<Vec<Vec<Real>>>,
    /// Adjoint of each impact amount, same shape as `impact_amount`.
    pub impact_amount_derivative: Vec<Vec<Real>>,
}

impl MonteCarloDiscountFactorDerivativeDataBundle {
    /// Create a bundle with zeroed adjoints.
    pub fn new(path_discount_factor: Vec<Vec<Vec<Real>>>, impact_amount: Vec<Vec<Real>>) -> Result<Self> {
        check_paths(&path_discount_factor, &impact_amount)?;
        let zero_amounts: Vec<Vec<Real>> = impact_amount.iter().map(|row| vec![0.0; row.len()]).collect();
        Ok(Self {
            path_discount_factor_derivative: vec![zero_amounts.clone(); path_discount_factor.len()],
            impact_amount_derivative: zero_amounts,
            path_discount_factor,
            impact_amount,
        })
    }

    /// Number of paths in the block.
    pub fn nb_path(&self) -> usize {
        self.path_discount_factor.len()
    }
}

fn check_paths(paths: &[Vec<Vec<Real>>], impact_amount: &[Vec<Real>]) -> Result<()> {
    irmc_core::ensure_shape!(!impact_amount.is_empty(), "a bundle needs at least one decision");
    for (p, path) in paths.iter().enumerate() {
        irmc_core::ensure_shape!(
            path.len() == impact_amount.len()
                && path.iter().zip(impact_amount).all(|(d, a)| d.len() == a.len()),
            "path {p} does not match the impact amounts shape"
        );
    }
    Ok(())
}

/// Simulated forward rates of one block.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloIborRateDataBundle {
    /// `[decision][period][path]` forward rates at each decision.
    pub path_ibor_rate: Vec<Vec<Vec<Real>>>,
    /// Accrual factor of each model period.
    pub delta: Vec<Real>,
    /// `[decision][impact]` reference amounts of the schedule.
    pub impact_amount: Vec<Vec<Real>>,
    /// `[decision][impact]` index of the model grid time closest to each
    /// impact time.
    pub impact_index: Vec<Vec<usize>>,
}

impl MonteCarloIborRateDataBundle {
    /// Create a bundle.
    pub fn new(
        path_ibor_rate: Vec<Vec<Vec<Real>>>,
        delta: Vec<Real>,
        impact_amount: Vec<Vec<Real>>,
        impact_index: Vec<Vec<usize>>,
    ) -> Result<Self> {
        irmc_core::ensure_shape!(!impact_amount.is_empty(), "a bundle needs at least one decision");
        irmc_core::ensure_shape!(
            path_ibor_rate.len() == impact_amount.len() && impact_index.len() == impact_amount.len(),
            "rates, amounts and indices must have one row per decision"
        );
        irmc_core::ensure_shape!(
            path_ibor_rate.iter().all(|rates| rates.len() == delta.len()),
            "every decision needs one rate row per period"
        );
        irmc_core::ensure_shape!(
            impact_index
                .iter()
                .zip(&impact_amount)
                .all(|(i, a)| i.len() == a.len() && i.iter().all(|&k| k <= delta.len())),
            "impact indices must be parallel to the amounts and within the grid"
        );
        Ok(Self {
            path_ibor_rate,
            delta,
            impact_amount,
            impact_index,
        })
    }

    /// Number of paths in the block.
    pub fn nb_path(&self) -> usize {
        self.path_ibor_rate
            .first()
            .and_then(|rates| rates.first())
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_bundle_zeroed() {
        let b = MonteCarloDiscountFactorDerivativeDataBundle::new(
            vec![vec![vec![0.9, 0.8]]; 3],
            vec![vec![1.0, -1.0]],
        )
        .unwrap();
        assert_eq!(b.nb_path(), 3);
        assert_eq!(b.path_discount_factor_derivative, vec![vec![vec![0.0, 0.0]]; 3]);
        assert_eq!(b.impact_amount_derivative, vec![vec![0.0, 0.0]]);
    }

    #[test]
    fn shape_mismatch() {
        let bad = MonteCarloDiscountFactorDataBundle::new(vec![vec![vec![0.9]]], vec![vec![1.0, -1.0]]);
        assert!(matches!(bad, Err(irmc_core::Error::ShapeMismatch(_))));
        let bad_index = MonteCarloIborRateDataBundle::new(
            vec![vec![vec![0.01; 4]; 2]],
            vec![0.5, 0.5],
            vec![vec![1.0]],
            vec![vec![5]],
        );
        assert!(bad_index.is_err());
    }

    #[test]
    fn no_decision_rejected() {
        assert!(matches!(
            MonteCarloDiscountFactorDataBundle::new(vec![vec![]; 2], vec![]),
            Err(irmc_core::Error::ShapeMismatch(_))
        ));
        assert!(matches!(
            MonteCarloDiscountFactorDerivativeDataBundle::new(vec![vec![]; 2], vec![]),
            Err(irmc_core::Error::ShapeMismatch(_))
        ));
        assert!(matches!(
            MonteCarloIborRateDataBundle::new(vec![], vec![0.5], vec![], vec![]),
            Err(irmc_core::Error::ShapeMismatch(_))
        ));
    }
}
