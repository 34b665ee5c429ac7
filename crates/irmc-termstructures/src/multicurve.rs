//! Multi-curve provider.
//!
//! The Monte Carlo engine queries curves through [`MulticurveProvider`]:
//! discount factors per currency, simply-compounded forward rates per Ibor
//! index, and the names under which sensitivities to those curves are
//! reported.

use crate::sensitivity::MulticurveSensitivity;
use crate::yield_curve::YieldCurve;
use irmc_core::{
    errors::{Error, Result},
    Currency, DiscountFactor, IborIndex, Rate, Real, Time,
};
use std::collections::{BTreeMap, HashMap};

/// Read-only curve queries used by pricing.
pub trait MulticurveProvider: Send + Sync {
    /// Discount factor of `currency` at time `t`.
    fn discount_factor(&self, currency: &Currency, t: Time) -> Result<DiscountFactor>;

    /// Simply-compounded forward rate of `index` over `[start, end]` with
    /// accrual factor `accrual`.
    fn simply_compounded_forward_rate(
        &self,
        index: &IborIndex,
        start: Time,
        end: Time,
        accrual: Real,
    ) -> Result<Rate>;

    /// Name of the discounting curve of `currency`.
    fn discounting_curve_name(&self, currency: &Currency) -> Result<String>;

    /// Name of the forward curve of `index`.
    fn forward_curve_name(&self, index: &IborIndex) -> Result<String>;

    /// Sensitivity of the forward rate of `index` over `[start, end]` to the
    /// zero rates of its forward curve.
    ///
    /// With `F = (P(s)/P(e) - 1)/δ`: `∂F/∂z(s) = -s(1+δF)/δ` and
    /// `∂F/∂z(e) = e(1+δF)/δ`.
    fn forward_rate_sensitivity(
        &self,
        index: &IborIndex,
        start: Time,
        end: Time,
        accrual: Real,
    ) -> Result<MulticurveSensitivity> {
        let forward = self.simply_compounded_forward_rate(index, start, end, accrual)?;
        let factor = (1.0 + accrual * forward) / accrual;
        Ok(MulticurveSensitivity::of(
            self.forward_curve_name(index)?,
            vec![(start, -start * factor), (end, end * factor)],
        ))
    }
}

// ── Curve-backed provider ────────────────────────────────────────────────────

/// A provider holding one discounting curve per currency and one forward
/// curve per Ibor index (keyed by index name).
#[derive(Debug, Clone, Default)]
pub struct MulticurveProviderDiscount {
    discounting: HashMap<Currency, YieldCurve>,
    forward: HashMap<String, YieldCurve>,
}

impl MulticurveProviderDiscount {
    /// An empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the discounting curve of `currency`.
    pub fn with_discount_curve(mut self, currency: Currency, curve: YieldCurve) -> Self {
        self.discounting.insert(currency, curve);
        self
    }

    /// Register the forward curve of `index`.
    pub fn with_forward_curve(mut self, index: &IborIndex, curve: YieldCurve) -> Self {
        self.forward.insert(index.name().to_string(), curve);
        self
    }

    /// The discounting curve of `currency`.
    pub fn discount_curve(&self, currency: &Currency) -> Result<&YieldCurve> {
        self.discounting
            .get(currency)
            .ok_or_else(|| Error::MissingCurve(format!("no discounting curve for {currency}")))
    }

    /// The forward curve of `index`.
    pub fn forward_curve(&self, index: &IborIndex) -> Result<&YieldCurve> {
        self.forward
            .get(index.name())
            .ok_or_else(|| Error::MissingCurve(format!("no forward curve for {index}")))
    }

    fn curves(&self) -> impl Iterator<Item = &YieldCurve> {
        self.discounting.values().chain(self.forward.values())
    }

    /// Copy of the provider in which every curve named `name` has node
    /// `node` shifted by `shift`.
    pub fn with_bumped_curve_node(&self, name: &str, node: usize, shift: Real) -> Result<Self> {
        let mut bumped = self.clone();
        let mut found = false;
        for curve in bumped
            .discounting
            .values_mut()
            .chain(bumped.forward.values_mut())
        {
            if curve.name() == name {
                *curve = curve.with_bumped_node(node, shift)?;
                found = true;
            }
        }
        if !found {
            return Err(Error::MissingCurve(format!("no curve named {name}")));
        }
        Ok(bumped)
    }

    /// Project point sensitivities onto the node zero rates of each curve.
    pub fn parameter_sensitivity(
        &self,
        sensitivity: &MulticurveSensitivity,
    ) -> Result<BTreeMap<String, Vec<Real>>> {
        let mut result = BTreeMap::new();
        for (name, points) in sensitivity.iter() {
            let curve = self
                .curves()
                .find(|c| c.name() == name)
                .ok_or_else(|| Error::MissingCurve(format!("no curve named {name}")))?;
            result.insert(name.to_string(), curve.node_sensitivity(points));
        }
        Ok(result)
    }
}

impl MulticurveProvider for MulticurveProviderDiscount {
    fn discount_factor(&self, currency: &Currency, t: Time) -> Result<DiscountFactor> {
        Ok(self.discount_curve(currency)?.discount_factor(t))
    }

    fn simply_compounded_forward_rate(
        &self,
        index: &IborIndex,
        start: Time,
        end: Time,
        accrual: Real,
    ) -> Result<Rate> {
        irmc_core::ensure!(accrual > 0.0, "accrual factor must be positive, got {accrual}");
        let curve = self.forward_curve(index)?;
        Ok((curve.discount_factor(start) / curve.discount_factor(end) - 1.0) / accrual)
    }

    fn discounting_curve_name(&self, currency: &Currency) -> Result<String> {
        Ok(self.discount_curve(currency)?.name().to_string())
    }

    fn forward_curve_name(&self, index: &IborIndex) -> Result<String> {
        Ok(self.forward_curve(index)?.name().to_string())
    }
}
