//! # irmc-models
//!
//! Parameter objects of the rate models simulated by the Monte Carlo
//! engine, with the closed-form volatility kernels the path generators
//! need, and the provider bundles pairing them with a curve provider.
//!
//! ```text
//! HullWhiteOneFactorPiecewiseConstantParameters   dr = (θ(t) − a·r) dt + σ(t) dW
//! G2ppPiecewiseConstantParameters                 r = x₀ + x₁ + φ(t), dW₀·dW₁ = ρ dt
//! LiborMarketModelDisplacedDiffusionParameters    d(F_k + d_k) = (F_k + d_k)·γ_k(t)·dW
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Short-rate models ────────────────────────────────────────────────────
pub mod g2pp;
pub mod hull_white;

// ── Market models ────────────────────────────────────────────────────────
pub mod libor_market_model;

// ── Model + curves bundles ───────────────────────────────────────────────
pub mod provider;

mod volatility_grid;

pub use g2pp::G2ppPiecewiseConstantParameters;
pub use hull_white::HullWhiteOneFactorPiecewiseConstantParameters;
pub use libor_market_model::LiborMarketModelDisplacedDiffusionParameters;
pub use provider::{
    G2ppProvider, HullWhiteOneFactorProvider, LiborMarketModelDisplacedDiffusionProvider,
};
