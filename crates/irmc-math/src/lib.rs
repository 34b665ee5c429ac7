//! # irmc-math
//!
//! Mathematical utilities: a matrix newtype over nalgebra, Cholesky
//! factorisation (with zero-variance stripping), linear interpolation,
//! the normal distribution (via statrs), random number generation, and a
//! statistics accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// 1D interpolation.
pub mod interpolations;

/// Dense matrix newtype.
pub mod matrix;

/// Matrix decompositions.
pub mod matrix_utilities;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse};
pub use interpolations::{Interpolation1D, LinearInterpolation};
pub use matrix::Matrix;
pub use matrix_utilities::{cholesky_decomposition, cholesky_decomposition_stripped};
pub use random_numbers::{
    InverseCumulativeNormalRng, MersenneTwisterUniformRng, PseudoRandomNormalRng,
    RandomNumberGenerator,
};
pub use statistics::Statistics;
