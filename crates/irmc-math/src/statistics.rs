//! Running moments of Monte Carlo estimates.
//!
//! Uses Welford's update so that long runs of nearly equal prices keep
//! their variance to full precision.

use irmc_core::Real;

/// Running mean and variance of a stream of samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    samples: usize,
    mean: Real,
    /// Sum of squared deviations from the running mean.
    m2: Real,
}

impl Statistics {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample.
    pub fn add(&mut self, x: Real) {
        self.samples += 1;
        let delta = x - self.mean;
        self.mean += delta / self.samples as Real;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of samples recorded.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Sample mean, `None` when empty.
    pub fn mean(&self) -> Option<Real> {
        (self.samples > 0).then_some(self.mean)
    }

    /// Unbiased sample variance, `None` below two samples.
    pub fn variance(&self) -> Option<Real> {
        (self.samples > 1).then(|| self.m2 / (self.samples - 1) as Real)
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean.
    pub fn error_estimate(&self) -> Option<Real> {
        self.variance().map(|v| (v / self.samples as Real).sqrt())
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        iter.into_iter().for_each(|x| self.add(x));
    }
}

impl FromIterator<Real> for Statistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}
