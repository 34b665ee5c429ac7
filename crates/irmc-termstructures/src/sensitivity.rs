//! `MulticurveSensitivity` — point sensitivities of a value to the zero
//! rates of named curves.
//!
//! Each entry `(t, s)` under curve `c` states that the value moves by `s`
//! per unit change of the continuously-compounded zero rate of `c` at time
//! `t`. Sensitivities form a vector space: they are added and scaled.

use irmc_core::{Real, Time};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Point sensitivities keyed by curve name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MulticurveSensitivity {
    sensitivities: BTreeMap<String, Vec<(Time, Real)>>,
}

impl MulticurveSensitivity {
    /// An empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sensitivity to a single curve.
    pub fn of(curve: impl Into<String>, points: Vec<(Time, Real)>) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(curve.into(), points);
        Self { sensitivities }
    }

    /// Append a single point to the given curve.
    pub fn add_point(&mut self, curve: &str, time: Time, value: Real) {
        self.sensitivities
            .entry(curve.to_string())
            .or_default()
            .push((time, value));
    }

    /// Points attached to `curve`, if any.
    pub fn get(&self, curve: &str) -> Option<&[(Time, Real)]> {
        self.sensitivities.get(curve).map(Vec::as_slice)
    }

    /// Iterate over `(curve, points)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(Time, Real)])> {
        self.sensitivities
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `true` when no point is attached to any curve.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.values().all(Vec::is_empty)
    }

    /// Sum of two sensitivities.
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result += other;
        result
    }

    /// Every point multiplied by `factor`.
    pub fn multiplied_by(&self, factor: Real) -> Self {
        let sensitivities = self
            .sensitivities
            .iter()
            .map(|(k, v)| (k.clone(), v.iter().map(|&(t, s)| (t, s * factor)).collect()))
            .collect();
        Self { sensitivities }
    }

    /// Points sorted by time with entries closer than `tolerance` merged.
    pub fn cleaned(&self, tolerance: Real) -> Self {
        let mut sensitivities = BTreeMap::new();
        for (curve, points) in &self.sensitivities {
            let mut sorted = points.clone();
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut merged: Vec<(Time, Real)> = Vec::with_capacity(sorted.len());
            for (t, s) in sorted {
                match merged.last_mut() {
                    Some(last) if (t - last.0).abs() < tolerance => last.1 += s,
                    _ => merged.push((t, s)),
                }
            }
            sensitivities.insert(curve.clone(), merged);
        }
        Self { sensitivities }
    }
}

impl AddAssign<&MulticurveSensitivity> for MulticurveSensitivity {
    fn add_assign(&mut self, other: &MulticurveSensitivity) {
        for (curve, points) in &other.sensitivities {
            self.sensitivities
                .entry(curve.clone())
                .or_default()
                .extend_from_slice(points);
        }
    }
}
