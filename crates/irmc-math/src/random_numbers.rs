//! Random number generators.
//!
//! The simulation consumes randomness through a single operation, "give me
//! `n` independent standard-normal draws", expressed by the
//! [`RandomNumberGenerator`] trait. Two implementations are provided: an
//! inverse-cumulative transform of a Mersenne Twister stream (reproducible
//! across platforms) and a `rand`/`rand_distr` backed generator.

use irmc_core::Real;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use rand_mt::Mt19937GenRand64;

/// A source of independent standard-normal draws.
pub trait RandomNumberGenerator {
    /// Return `n` independent standard-normal draws.
    fn get_vector(&mut self, n: usize) -> Vec<Real>;
}

impl<R: RandomNumberGenerator + ?Sized> RandomNumberGenerator for &mut R {
    fn get_vector(&mut self, n: usize) -> Vec<Real> {
        (**self).get_vector(n)
    }
}

impl<R: RandomNumberGenerator + ?Sized> RandomNumberGenerator for Box<R> {
    fn get_vector(&mut self, n: usize) -> Vec<Real> {
        (**self).get_vector(n)
    }
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // 53 random bits mapped to [0.0, 1.0)
        (self.rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// An inverse-cumulative normal random number generator.
///
/// Wraps a uniform Mersenne Twister and transforms its output through the
/// inverse CDF of the standard normal distribution.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }

    /// Generate the next standard-normal deviate.
    pub fn next_real(&mut self) -> Real {
        // Avoid exact 0 which would produce -∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

impl RandomNumberGenerator for InverseCumulativeNormalRng {
    fn get_vector(&mut self, n: usize) -> Vec<Real> {
        (0..n).map(|_| self.next_real()).collect()
    }
}

/// Standard-normal draws from `rand`'s seeded `StdRng` through
/// `rand_distr::StandardNormal`.
pub struct PseudoRandomNormalRng {
    rng: StdRng,
}

impl PseudoRandomNormalRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomNumberGenerator for PseudoRandomNormalRng {
    fn get_vector(&mut self, n: usize) -> Vec<Real> {
        (0..n).map(|_| StandardNormal.sample(&mut self.rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::Statistics;

    fn moments(draws: &[Real]) -> (Real, Real) {
        let stats: Statistics = draws.iter().copied().collect();
        (stats.mean().unwrap(), stats.variance().unwrap())
    }

    #[test]
    fn mt_range() {
        let mut rng = MersenneTwisterUniformRng::new(42);
        for _ in 0..1_000 {
            let x = rng.next_real();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn icn_moments() {
        let mut rng = InverseCumulativeNormalRng::new(42);
        let (mean, var) = moments(&rng.get_vector(20_000));
        assert!(mean.abs() < 0.05, "mean {mean} out of expected range");
        assert!((var - 1.0).abs() < 0.05, "variance {var} out of expected range");
    }

    #[test]
    fn std_rng_moments() {
        let mut rng = PseudoRandomNormalRng::new(7);
        let (mean, var) = moments(&rng.get_vector(20_000));
        assert!(mean.abs() < 0.05, "mean {mean} out of expected range");
        assert!((var - 1.0).abs() < 0.05, "variance {var} out of expected range");
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = InverseCumulativeNormalRng::new(11);
        let mut b = InverseCumulativeNormalRng::new(11);
        assert_eq!(a.get_vector(10), b.get_vector(10));
    }
}
