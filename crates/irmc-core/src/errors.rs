//! Error types for irmc.
//!
//! A single `thiserror`-derived enum covers every failure of the pricing
//! stack. The `ensure!` and `fail!` convenience macros map a violated
//! precondition or an unreachable state to an early `Err` return.

use thiserror::Error;

/// The top-level error type used throughout irmc.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A calculator was handed an instrument variant it does not price.
    #[error("unsupported instrument: {calculator} cannot handle {instrument}")]
    UnsupportedInstrument {
        /// Name of the calculator that rejected the instrument.
        calculator: &'static str,
        /// Name of the instrument variant.
        instrument: &'static str,
    },

    /// A numerical algorithm could not run on its input (e.g. a covariance
    /// matrix that is not positive-definite).
    #[error("numerical precondition failed: {0}")]
    NumericalPrecondition(String),

    /// Arrays that must line up do not (schedule vs. bundle, amounts vs. times).
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// No curve is registered under the requested key.
    #[error("missing curve: {0}")]
    MissingCurve(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Shorthand for [`Error::UnsupportedInstrument`].
    pub fn unsupported(calculator: &'static str, instrument: &'static str) -> Self {
        Error::UnsupportedInstrument {
            calculator,
            instrument,
        }
    }
}

/// Shorthand `Result` type used throughout irmc.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use irmc_core::{ensure, errors::Error};
/// fn positive(x: f64) -> irmc_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::ShapeMismatch(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use irmc_core::{ensure_shape, errors::Error};
/// fn same_len(a: &[f64], b: &[f64]) -> irmc_core::errors::Result<()> {
///     ensure_shape!(a.len() == b.len(), "{} vs {}", a.len(), b.len());
///     Ok(())
/// }
/// assert!(same_len(&[1.0], &[2.0]).is_ok());
/// assert!(matches!(same_len(&[1.0], &[]), Err(Error::ShapeMismatch(_))));
/// ```
#[macro_export]
macro_rules! ensure_shape {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::ShapeMismatch(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use irmc_core::{fail, errors::Error};
/// fn always_err() -> irmc_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
