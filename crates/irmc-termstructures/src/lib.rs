//! # irmc-termstructures
//!
//! Discounting and forwarding curves as consumed by the Monte Carlo engine.
//!
//! * [`YieldCurve`] — continuously-compounded zero rates on time nodes,
//!   linearly interpolated
//! * [`MulticurveProvider`] — the narrow query interface the engine needs:
//!   discount factor, simply-compounded forward rate, and curve names
//! * [`MulticurveProviderDiscount`] — a provider backed by one discounting
//!   curve per currency and one forward curve per Ibor index
//! * [`MulticurveSensitivity`] — point sensitivities to the zero rates of
//!   named curves

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Multi-curve provider trait and implementation.
pub mod multicurve;

/// Curve sensitivity container.
pub mod sensitivity;

/// Zero-rate yield curve.
pub mod yield_curve;

pub use multicurve::{MulticurveProvider, MulticurveProviderDiscount};
pub use sensitivity::MulticurveSensitivity;
pub use yield_curve::YieldCurve;
