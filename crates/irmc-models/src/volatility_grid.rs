//! Piecewise-constant volatility time grid shared by the short-rate models.

use irmc_core::{errors::Result, Real, Time};

/// Last grid time; volatilities are constant beyond the last change time.
pub(crate) const VOLATILITY_TIME_MAX: Time = 1000.0;

/// `0 = s_0 < s_1 < … < s_n = VOLATILITY_TIME_MAX`; volatility `i` applies
/// on `[s_i, s_{i+1})`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VolatilityGrid {
    times: Vec<Time>,
}

impl VolatilityGrid {
    /// Grid for `nb_volatility` levels changing at `change_times`.
    pub(crate) fn new(change_times: &[Time], nb_volatility: usize) -> Result<Self> {
        irmc_core::ensure!(nb_volatility >= 1, "at least one volatility level is required");
        irmc_core::ensure!(
            change_times.len() + 1 == nb_volatility,
            "{} volatility levels need {} change times, got {}",
            nb_volatility,
            nb_volatility - 1,
            change_times.len()
        );
        let mut times = Vec::with_capacity(nb_volatility + 1);
        times.push(0.0);
        times.extend_from_slice(change_times);
        times.push(VOLATILITY_TIME_MAX);
        irmc_core::ensure!(
            times.windows(2).all(|w| w[1] > w[0]),
            "volatility change times must be strictly increasing in (0, {VOLATILITY_TIME_MAX})"
        );
        Ok(Self { times })
    }

    /// Grid times including the leading 0 and the trailing sentinel.
    pub(crate) fn times(&self) -> &[Time] {
        &self.times
    }

    /// Pieces `(i, lo, hi)` of `[theta0, theta1]` on which volatility `i`
    /// applies.
    pub(crate) fn segments(&self, theta0: Time, theta1: Time) -> Vec<(usize, Time, Time)> {
        let mut result = Vec::new();
        if theta1 <= theta0 {
            return result;
        }
        for (i, w) in self.times.windows(2).enumerate() {
            let lo = w[0].max(theta0);
            let hi = w[1].min(theta1);
            if hi > lo {
                result.push((i, lo, hi));
            }
        }
        result
    }
}

/// `∫_{s0}^{s1} e^{k s} ds`, continuous at `k = 0`.
pub(crate) fn exponential_integral(k: Real, s0: Time, s1: Time) -> Real {
    if k.abs() < 1e-12 {
        s1 - s0
    } else {
        ((k * s1).exp() - (k * s0).exp()) / k
    }
}

/// `(e^{-a u} - e^{-a v}) / a`, continuous at `a = 0`.
pub(crate) fn maturity_factor(a: Real, u: Time, v: Time) -> Real {
    if a.abs() < 1e-12 {
        v - u
    } else {
        ((-a * u).exp() - (-a * v).exp()) / a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn segments_split_on_change_times() {
        let grid = VolatilityGrid::new(&[1.0, 2.0], 3).unwrap();
        assert_eq!(
            grid.segments(0.5, 2.5),
            vec![(0, 0.5, 1.0), (1, 1.0, 2.0), (2, 2.0, 2.5)]
        );
        assert!(grid.segments(1.0, 1.0).is_empty());
    }

    #[test]
    fn rejects_bad_grids() {
        assert!(VolatilityGrid::new(&[1.0], 1).is_err());
        assert!(VolatilityGrid::new(&[2.0, 1.0], 3).is_err());
        assert!(VolatilityGrid::new(&[0.0], 2).is_err());
    }

    #[test]
    fn zero_rate_limits() {
        assert_relative_eq!(exponential_integral(0.0, 1.0, 3.0), 2.0);
        assert_relative_eq!(
            exponential_integral(1e-6, 1.0, 3.0),
            2.0,
            epsilon = 1e-5
        );
        assert_relative_eq!(maturity_factor(0.0, 1.0, 4.0), 3.0);
        assert_relative_eq!(maturity_factor(1e-6, 1.0, 4.0), 3.0, epsilon = 1e-5);
    }
}
