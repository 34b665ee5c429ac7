//! Standard normal distribution on top of statrs' error functions.

use irmc_core::Real;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

/// `Φ(x) = erfc(−x/√2) / 2`, accurate in both tails.
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// `Φ⁻¹(p) = −√2 · erfc⁻¹(2p)`; `±∞` at `p = 1` and `p = 0`.
pub fn normal_cdf_inverse(p: Real) -> Real {
    -SQRT_2 * erfc_inv(2.0 * p)
}
