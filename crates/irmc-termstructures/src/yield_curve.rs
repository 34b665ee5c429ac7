//! `YieldCurve` — a curve defined by continuously-compounded zero rates at
//! node times.
//!
//! Zero rates are interpolated linearly in time and discount factors are
//! computed as `P(t) = exp(-z(t) * t)`.

use irmc_core::{errors::Result, DiscountFactor, Rate, Real, Time};
use irmc_math::{Interpolation1D, LinearInterpolation};

/// A named zero-rate curve.
#[derive(Debug, Clone)]
pub struct YieldCurve {
    name: String,
    interpolation: LinearInterpolation,
}

impl YieldCurve {
    /// Build a curve from node times and zero rates.
    ///
    /// # Arguments
    /// * `name` — identifier under which sensitivities are reported
    /// * `times` — strictly increasing node times (at least two)
    /// * `zero_rates` — continuously-compounded zero rates at each node
    pub fn new(name: impl Into<String>, times: &[Time], zero_rates: &[Rate]) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            interpolation: LinearInterpolation::new(times, zero_rates)?,
        })
    }

    /// A curve with the same zero rate at every maturity.
    pub fn flat(name: impl Into<String>, rate: Rate) -> Result<Self> {
        Self::new(name, &[1.0, 30.0], &[rate, rate])
    }

    /// Curve name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node times.
    pub fn node_times(&self) -> &[Time] {
        self.interpolation.xs()
    }

    /// Zero rates at the nodes.
    pub fn node_rates(&self) -> &[Rate] {
        self.interpolation.ys()
    }

    /// Continuously-compounded zero rate for time `t`.
    pub fn zero_rate(&self, t: Time) -> Rate {
        self.interpolation.operator(t)
    }

    /// Discount factor for time `t`.
    pub fn discount_factor(&self, t: Time) -> DiscountFactor {
        if t == 0.0 {
            return 1.0;
        }
        (-self.zero_rate(t) * t).exp()
    }

    /// Project point sensitivities `(t, ∂V/∂z(t))` onto the node zero rates.
    pub fn node_sensitivity(&self, points: &[(Time, Real)]) -> Vec<Real> {
        let mut result = vec![0.0; self.node_times().len()];
        for &(t, value) in points {
            let weights = self.interpolation.node_sensitivities(t);
            for (r, w) in result.iter_mut().zip(weights) {
                *r += w * value;
            }
        }
        result
    }

    /// Copy of the curve with the zero rate of node `node` shifted by `shift`.
    pub fn with_bumped_node(&self, node: usize, shift: Real) -> Result<Self> {
        irmc_core::ensure!(
            node < self.node_rates().len(),
            "node {node} out of range for curve {}",
            self.name
        );
        let mut rates = self.node_rates().to_vec();
        rates[node] += shift;
        Self::new(self.name.clone(), self.node_times(), &rates)
    }
}
