//! The `InstrumentDerivative` sum type and its visitor.
//!
//! Calculators implement [`InstrumentDerivativeVisitor`] and override the
//! variants they handle; every other variant falls through to
//! [`Error::UnsupportedInstrument`].

use crate::{
    AnnuityCouponIborRatchet, CapFloorIbor, SwapFixedIbor, SwaptionCashFixedIbor,
    SwaptionPhysicalFixedIbor,
};
use irmc_cashflows::{CouponFixed, CouponIbor};
use irmc_core::errors::{Error, Result};

/// An instrument reduced to times and amounts.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentDerivative {
    /// Physically settled swaption.
    SwaptionPhysicalFixedIbor(SwaptionPhysicalFixedIbor),
    /// Cash-settled swaption.
    SwaptionCashFixedIbor(SwaptionCashFixedIbor),
    /// Ibor caplet / floorlet.
    CapFloorIbor(CapFloorIbor),
    /// Annuity of ratchet coupons.
    AnnuityCouponIborRatchet(AnnuityCouponIborRatchet),
    /// Fixed-for-Ibor swap.
    SwapFixedIbor(SwapFixedIbor),
    /// Fixed coupon.
    CouponFixed(CouponFixed),
    /// Ibor coupon.
    CouponIbor(CouponIbor),
}

impl InstrumentDerivative {
    /// Variant name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentDerivative::SwaptionPhysicalFixedIbor(_) => "SwaptionPhysicalFixedIbor",
            InstrumentDerivative::SwaptionCashFixedIbor(_) => "SwaptionCashFixedIbor",
            InstrumentDerivative::CapFloorIbor(_) => "CapFloorIbor",
            InstrumentDerivative::AnnuityCouponIborRatchet(_) => "AnnuityCouponIborRatchet",
            InstrumentDerivative::SwapFixedIbor(_) => "SwapFixedIbor",
            InstrumentDerivative::CouponFixed(_) => "CouponFixed",
            InstrumentDerivative::CouponIbor(_) => "CouponIbor",
        }
    }

    /// Dispatch to the visitor method of this variant.
    pub fn accept<V: InstrumentDerivativeVisitor>(
        &self,
        visitor: &mut V,
    ) -> Result<V::Output> {
        match self {
            InstrumentDerivative::SwaptionPhysicalFixedIbor(i) => {
                visitor.visit_swaption_physical_fixed_ibor(i)
            }
            InstrumentDerivative::SwaptionCashFixedIbor(i) => {
                visitor.visit_swaption_cash_fixed_ibor(i)
            }
            InstrumentDerivative::CapFloorIbor(i) => visitor.visit_cap_floor_ibor(i),
            InstrumentDerivative::AnnuityCouponIborRatchet(i) => {
                visitor.visit_annuity_coupon_ibor_ratchet(i)
            }
            InstrumentDerivative::SwapFixedIbor(i) => visitor.visit_swap_fixed_ibor(i),
            InstrumentDerivative::CouponFixed(i) => visitor.visit_coupon_fixed(i),
            InstrumentDerivative::CouponIbor(i) => visitor.visit_coupon_ibor(i),
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for InstrumentDerivative {
                fn from(value: $variant) -> Self {
                    InstrumentDerivative::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    SwaptionPhysicalFixedIbor,
    SwaptionCashFixedIbor,
    CapFloorIbor,
    AnnuityCouponIborRatchet,
    SwapFixedIbor,
    CouponFixed,
    CouponIbor
);

/// A calculation over [`InstrumentDerivative`] variants.
///
/// Default methods reject the variant with
/// [`Error::UnsupportedInstrument`] naming [`Self::NAME`].
pub trait InstrumentDerivativeVisitor {
    /// Result of a successful visit.
    type Output;

    /// Calculator name reported in errors.
    const NAME: &'static str;

    /// Physically settled swaption.
    fn visit_swaption_physical_fixed_ibor(
        &mut self,
        _swaption: &SwaptionPhysicalFixedIbor,
    ) -> Result<Self::Output> {
        Err(Error::unsupported(Self::NAME, "SwaptionPhysicalFixedIbor"))
    }

    /// Cash-settled swaption.
    fn visit_swaption_cash_fixed_ibor(
        &mut self,
        _swaption: &SwaptionCashFixedIbor,
    ) -> Result<Self::Output> {
        Err(Error::unsupported(Self::NAME, "SwaptionCashFixedIbor"))
    }

    /// Ibor caplet / floorlet.
    fn visit_cap_floor_ibor(&mut self, _cap: &CapFloorIbor) -> Result<Self::Output> {
        Err(Error::unsupported(Self::NAME, "CapFloorIbor"))
    }

    /// Ratchet annuity.
    fn visit_annuity_coupon_ibor_ratchet(
        &mut self,
        _annuity: &AnnuityCouponIborRatchet,
    ) -> Result<Self::Output> {
        Err(Error::unsupported(Self::NAME, "AnnuityCouponIborRatchet"))
    }

    /// Fixed-for-Ibor swap.
    fn visit_swap_fixed_ibor(&mut self, _swap: &SwapFixedIbor) -> Result<Self::Output> {
        Err(Error::unsupported(Self::NAME, "SwapFixedIbor"))
    }

    /// Fixed coupon.
    fn visit_coupon_fixed(&mut self, _coupon: &CouponFixed) -> Result<Self::Output> {
        Err(Error::unsupported(Self::NAME, "CouponFixed"))
    }

    /// Ibor coupon.
    fn visit_coupon_ibor(&mut self, _coupon: &CouponIbor) -> Result<Self::Output> {
        Err(Error::unsupported(Self::NAME, "CouponIbor"))
    }
}
