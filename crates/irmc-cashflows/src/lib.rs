//! # irmc-cashflows
//!
//! Payments and coupons expressed in year fractions from the valuation
//! date, and the [`Annuity`] leg that strings them together.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod annuity;
pub mod coupon;
pub mod coupon_ibor;
pub mod coupon_ibor_ratchet;
pub mod payment;

pub use annuity::{fixed_leg, ibor_leg, Annuity, LegSchedule};
pub use coupon::{Coupon, CouponFixed};
pub use coupon_ibor::{CouponIbor, CouponIborGearing};
pub use coupon_ibor_ratchet::{CouponIborRatchet, RatchetCoefficients};
pub use payment::{Payment, PaymentFixed};
