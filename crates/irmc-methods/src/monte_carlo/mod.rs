//! Monte Carlo framework.
//!
//! # Overview
//!
//! ```text
//! instrument ──DecisionScheduleCalculator──▶ DecisionSchedule
//!            ──(per block) normal draws ──▶ correlated paths ──▶ data bundle
//!            ──payoff calculator──▶ block sum ──▶ Σ · numeraire / nb_path
//! ```
//!
//! * [`DecisionSchedule`] — decision times and, for each, the cash-flow
//!   times and amounts the decision depends on
//! * data bundles — simulated discount factors or forward rates of one block
//! * payoff calculators — visitors summing path-wise payoffs of a block
//! * [`MonteCarloMethod`] — random source, path count and block management
//!   shared by the model methods

// ─── Schedules ────────────────────────────────────────────────────────────────
mod decision_schedule;
mod decision_schedule_calculator;
mod decision_schedule_derivative_calculator;

// ─── Bundles and payoffs ──────────────────────────────────────────────────────
mod data_bundle;
mod discount_factor_calculator;
mod discount_factor_derivative_calculator;
mod ibor_rate_calculator;

// ─── Methods ──────────────────────────────────────────────────────────────────
mod g2pp;
mod hull_white;
mod libor_market_model;
mod method;

pub use data_bundle::{
    MonteCarloDiscountFactorDataBundle, MonteCarloDiscountFactorDerivativeDataBundle,
    MonteCarloIborRateDataBundle,
};
pub use decision_schedule::{DecisionSchedule, DecisionScheduleDerivative};
pub use decision_schedule_calculator::DecisionScheduleCalculator;
pub use decision_schedule_derivative_calculator::DecisionScheduleDerivativeCalculator;
pub use discount_factor_calculator::MonteCarloDiscountFactorCalculator;
pub use discount_factor_derivative_calculator::MonteCarloDiscountFactorDerivativeCalculator;
pub use g2pp::G2ppMonteCarloMethod;
pub use hull_white::HullWhiteMonteCarloMethod;
pub use ibor_rate_calculator::MonteCarloIborRateCalculator;
pub use libor_market_model::LiborMarketModelMonteCarloMethod;
pub use method::{block_sizes, MonteCarloConfig, MonteCarloMethod};
