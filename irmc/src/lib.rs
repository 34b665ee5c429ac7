//! # irmc
//!
//! Monte Carlo valuation of interest-rate derivatives.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `irmc-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use irmc::cashflows::CouponIbor;
//! use irmc::core::{Currency, IborIndex};
//! use irmc::instruments::{CapFloorIbor, InstrumentDerivative};
//! use irmc::math::InverseCumulativeNormalRng;
//! use irmc::methods::HullWhiteMonteCarloMethod;
//! use irmc::models::{HullWhiteOneFactorPiecewiseConstantParameters, HullWhiteOneFactorProvider};
//! use irmc::termstructures::{MulticurveProviderDiscount, YieldCurve};
//! use std::sync::Arc;
//!
//! # fn main() -> irmc::core::Result<()> {
//! let eur = Currency::eur();
//! let index = IborIndex::new("EURIBOR3M", eur.clone());
//! let multicurve = MulticurveProviderDiscount::new()
//!     .with_discount_curve(eur.clone(), YieldCurve::flat("EUR-DSC", 0.02)?)
//!     .with_forward_curve(&index, YieldCurve::flat("EUR-EURIBOR3M", 0.025)?);
//! let parameters = HullWhiteOneFactorPiecewiseConstantParameters::constant(0.05, 0.01)?;
//! let provider = HullWhiteOneFactorProvider::new(parameters, eur.clone(), Arc::new(multicurve));
//!
//! // 1y into 3m caplet struck at 2.5 %.
//! let coupon = CouponIbor::new(eur.clone(), 1.25, 0.25, 1e6, index, 1.0, 1.0, 1.25, 0.25);
//! let caplet = InstrumentDerivative::from(CapFloorIbor::new(coupon, 0.025, true));
//!
//! let mut method = HullWhiteMonteCarloMethod::new(InverseCumulativeNormalRng::new(42), 10_000);
//! let pv = method.present_value(&caplet, &eur, &provider)?;
//! assert!(pv.amount > 0.0);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use irmc_core as core;

/// Matrices, Cholesky factorisation, normal distribution, RNG, statistics.
pub use irmc_math as math;

/// Yield curves, the multi-curve provider and curve sensitivities.
pub use irmc_termstructures as termstructures;

/// Hull-White, G2++ and LMM parameters and providers.
pub use irmc_models as models;

/// Payments, coupons and annuities.
pub use irmc_cashflows as cashflows;

/// Swaps, swaptions, caps/floors, ratchets and cash-flow equivalents.
pub use irmc_instruments as instruments;

/// Monte Carlo methods.
pub use irmc_methods as methods;
