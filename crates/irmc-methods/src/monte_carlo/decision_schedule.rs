//! Decision schedules.
//!
//! A decision schedule lists the times at which the holder of an
//! instrument learns something (an exercise, a fixing) and, for each, the
//! cash-flow times whose discount factors reconstruct the payoff together
//! with their reference amounts.

use irmc_core::{errors::Result, Real, Time};
use irmc_termstructures::MulticurveSensitivity;

/// Decision times with the impacted cash-flow times and amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionSchedule {
    decision_time: Vec<Time>,
    impact_time: Vec<Vec<Time>>,
    impact_amount: Vec<Vec<Real>>,
}

impl DecisionSchedule {
    /// Create a schedule; `impact_time[j]` and `impact_amount[j]` must have
    /// the same length for every decision `j`.
    pub fn new(
        decision_time: Vec<Time>,
        impact_time: Vec<Vec<Time>>,
        impact_amount: Vec<Vec<Real>>,
    ) -> Result<Self> {
        irmc_core::ensure!(!decision_time.is_empty(), "a schedule needs at least one decision");
        irmc_core::ensure!(
            decision_time.iter().all(|t| *t >= 0.0),
            "decision times must be non-negative"
        );
        irmc_core::ensure_shape!(
            impact_time.len() == decision_time.len() && impact_amount.len() == decision_time.len(),
            "{} decisions but {} impact time rows and {} impact amount rows",
            decision_time.len(),
            impact_time.len(),
            impact_amount.len()
        );
        for (j, (times, amounts)) in impact_time.iter().zip(&impact_amount).enumerate() {
            irmc_core::ensure_shape!(
                times.len() == amounts.len(),
                "decision {j}: {} impact times but {} impact amounts",
                times.len(),
                amounts.len()
            );
        }
        Ok(Self {
            decision_time,
            impact_time,
            impact_amount,
        })
    }

    /// Decision times.
    pub fn decision_time(&self) -> &[Time] {
        &self.decision_time
    }

    /// Impact times per decision.
    pub fn impact_time(&self) -> &[Vec<Time>] {
        &self.impact_time
    }

    /// Impact amounts per decision.
    pub fn impact_amount(&self) -> &[Vec<Real>] {
        &self.impact_amount
    }

    /// Number of decisions.
    pub fn nb_decision(&self) -> usize {
        self.decision_time.len()
    }

    /// Last decision time; the short-rate methods simulate under its
    /// forward measure.
    pub fn numeraire_time(&self) -> Time {
        self.decision_time[self.decision_time.len() - 1]
    }
}

/// A decision schedule with the curve sensitivity of every impact amount.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionScheduleDerivative {
    schedule: DecisionSchedule,
    impact_amount_derivative: Vec<Vec<MulticurveSensitivity>>,
}

impl DecisionScheduleDerivative {
    /// Attach `impact_amount_derivative`, parallel to the impact amounts.
    pub fn new(
        schedule: DecisionSchedule,
        impact_amount_derivative: Vec<Vec<MulticurveSensitivity>>,
    ) -> Result<Self> {
        irmc_core::ensure_shape!(
            impact_amount_derivative.len() == schedule.nb_decision()
                && impact_amount_derivative
                    .iter()
                    .zip(schedule.impact_amount())
                    .all(|(d, a)| d.len() == a.len()),
            "impact amount derivatives must be parallel to the impact amounts"
        );
        Ok(Self {
            schedule,
            impact_amount_derivative,
        })
    }

    /// The underlying schedule.
    pub fn schedule(&self) -> &DecisionSchedule {
        &self.schedule
    }

    /// Curve sensitivities of the impact amounts.
    pub fn impact_amount_derivative(&self) -> &[Vec<MulticurveSensitivity>] {
        &self.impact_amount_derivative
    }
}
