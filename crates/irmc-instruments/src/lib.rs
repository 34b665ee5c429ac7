//! # irmc-instruments
//!
//! Interest-rate instruments priced by the Monte Carlo methods, the
//! [`InstrumentDerivative`] sum type with its visitor trait, and the
//! cash-flow-equivalent transform.
//!
//! ```text
//! InstrumentDerivative
//! ├── SwaptionPhysicalFixedIbor
//! ├── SwaptionCashFixedIbor
//! ├── CapFloorIbor
//! ├── AnnuityCouponIborRatchet
//! └── SwapFixedIbor, CouponFixed, CouponIbor
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cap_floor;
pub mod cash_flow_equivalent;
pub mod derivative;
pub mod ratchet;
pub mod swap;
pub mod swaption;

pub use cap_floor::CapFloorIbor;
pub use cash_flow_equivalent::{
    ibor_beta, ibor_beta_sensitivity, CashFlowEquivalentCalculator,
    CashFlowEquivalentCurveSensitivityCalculator,
};
pub use derivative::{InstrumentDerivative, InstrumentDerivativeVisitor};
pub use ratchet::{AnnuityCouponIborRatchet, RatchetCoupon};
pub use swap::SwapFixedIbor;
pub use swaption::{SwaptionCashFixedIbor, SwaptionPhysicalFixedIbor};
