//! # irmc-core
//!
//! Core types, traits, and error definitions for irmc.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – type aliases, the error hierarchy, the
//! long/short [`Position`], and the [`Currency`] / [`IborIndex`] keys used to
//! look curves up.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Currency codes.
pub mod currency;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Ibor index description.
pub mod ibor_index;

/// Position (long/short) enum.
pub mod position;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate.
pub type Spread = Real;

/// A discount factor in [0, 1].
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A volatility level expressed as a decimal.
pub type Volatility = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use currency::{Currency, CurrencyAmount};
pub use errors::{Error, Result};
pub use ibor_index::IborIndex;
pub use position::Position;
