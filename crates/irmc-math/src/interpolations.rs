//! 1D interpolation trait and the linear scheme used by zero-rate curves.

use irmc_core::{errors::Result, Real};

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolation1D: std::fmt::Debug + Send + Sync {
    /// Evaluate the interpolation at `x`.
    fn operator(&self, x: Real) -> Real;

    /// Derivative of `f(x)` with respect to each node value `y[i]`.
    fn node_sensitivities(&self, x: Real) -> Vec<Real>;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Linear interpolation, extrapolated linearly from the first and last
/// segments.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct a linear interpolation from sorted `xs` and corresponding `ys`.
    ///
    /// # Errors
    /// Returns an error if the slices have different lengths, fewer than 2
    /// points, or `xs` is not strictly increasing.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        irmc_core::ensure!(xs.len() >= 2, "need at least 2 points for interpolation");
        irmc_core::ensure!(
            xs.len() == ys.len(),
            "xs and ys must have the same length"
        );
        irmc_core::ensure!(
            xs.windows(2).all(|w| w[1] > w[0]),
            "xs must be strictly increasing"
        );
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Node abscissas.
    pub fn xs(&self) -> &[Real] {
        &self.xs
    }

    /// Node values.
    pub fn ys(&self) -> &[Real] {
        &self.ys
    }

    fn locate(&self, x: Real) -> usize {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return 0;
        }
        if x >= self.xs[n - 1] {
            return n - 2;
        }
        // Index of the last node <= x.
        self.xs.partition_point(|&xi| xi <= x) - 1
    }

    /// Weights `(w_i, w_{i+1})` of the two nodes bracketing `x`.
    fn weights(&self, x: Real) -> (usize, Real, Real) {
        let i = self.locate(x);
        let u = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        (i, 1.0 - u, u)
    }
}

impl Interpolation1D for LinearInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn operator(&self, x: Real) -> Real {
        let (i, w0, w1) = self.weights(x);
        w0 * self.ys[i] + w1 * self.ys[i + 1]
    }

    fn node_sensitivities(&self, x: Real) -> Vec<Real> {
        let (i, w0, w1) = self.weights(x);
        let mut result = vec![0.0; self.xs.len()];
        result[i] = w0;
        result[i + 1] = w1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_interpolation() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 4.0];
        let interp = LinearInterpolation::new(&xs, &ys).unwrap();
        assert_relative_eq!(interp.operator(0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(interp.operator(1.5), 2.5, epsilon = 1e-12);
        assert_relative_eq!(interp.operator(2.0), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_extrapolation_uses_end_segments() {
        let interp = LinearInterpolation::new(&[1.0, 2.0, 3.0], &[1.0, 2.0, 2.0]).unwrap();
        assert_relative_eq!(interp.operator(0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(interp.operator(4.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn node_sensitivities_match_bumps() {
        let xs = [0.0, 0.5, 2.0, 5.0];
        let ys = [0.01, 0.02, 0.025, 0.03];
        let interp = LinearInterpolation::new(&xs, &ys).unwrap();
        for &x in &[0.1, 0.5, 1.3, 4.9, 6.0] {
            let sens = interp.node_sensitivities(x);
            for k in 0..ys.len() {
                let mut bumped = ys;
                bumped[k] += 1e-6;
                let b = LinearInterpolation::new(&xs, &bumped).unwrap();
                let fd = (b.operator(x) - interp.operator(x)) / 1e-6;
                assert_relative_eq!(sens[k], fd, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn rejects_unsorted_nodes() {
        assert!(LinearInterpolation::new(&[0.0, 0.0], &[1.0, 2.0]).is_err());
        assert!(LinearInterpolation::new(&[0.0], &[1.0]).is_err());
    }
}
