//! # irmc-methods
//!
//! Monte Carlo valuation of interest-rate derivatives.
//!
//! * [`HullWhiteMonteCarloMethod`] — exact discount-factor simulation under
//!   the Hull-White one-factor model, with adjoint curve sensitivities
//! * [`G2ppMonteCarloMethod`] — exact discount-factor simulation under G2++
//! * [`LiborMarketModelMonteCarloMethod`] — predictor-corrector forward-rate
//!   simulation under the displaced-diffusion LMM
//!
//! Every method turns the instrument into a [`DecisionSchedule`], simulates
//! paths in blocks and sums path-wise payoffs with a visitor calculator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Monte Carlo framework and model methods.
pub mod monte_carlo;

pub use monte_carlo::{
    block_sizes, DecisionSchedule, DecisionScheduleCalculator, DecisionScheduleDerivative,
    DecisionScheduleDerivativeCalculator, G2ppMonteCarloMethod, HullWhiteMonteCarloMethod,
    LiborMarketModelMonteCarloMethod, MonteCarloConfig, MonteCarloDiscountFactorCalculator,
    MonteCarloDiscountFactorDataBundle, MonteCarloDiscountFactorDerivativeCalculator,
    MonteCarloDiscountFactorDerivativeDataBundle, MonteCarloIborRateCalculator,
    MonteCarloIborRateDataBundle, MonteCarloMethod,
};
