//! G2++ Monte Carlo.

mod common;

use approx::assert_relative_eq;
use common::*;
use irmc_cashflows::Payment;
use irmc_core::{Error, Position, Real};
use irmc_instruments::InstrumentDerivative;
use irmc_math::InverseCumulativeNormalRng;
use irmc_methods::G2ppMonteCarloMethod;
use irmc_models::{G2ppPiecewiseConstantParameters, G2ppProvider, HullWhiteOneFactorPiecewiseConstantParameters};
use std::sync::Arc;

fn provider(volatility: [Real; 2], correlation: Real) -> G2ppProvider {
    let parameters = G2ppPiecewiseConstantParameters::constant([0.05, 0.3], volatility, correlation).unwrap();
    G2ppProvider::new(parameters, eur(), Arc::new(multicurve()))
}

fn price(instrument: &InstrumentDerivative, provider: &G2ppProvider, seed: u64, nb_path: usize) -> Real {
    G2ppMonteCarloMethod::new(InverseCumulativeNormalRng::new(seed), nb_path)
        .present_value(instrument, &eur(), provider)
        .unwrap()
        .amount
}

// ───────────────────────── caps and floors ─────────────────────────

#[test]
fn test_negligible_second_factor_matches_hull_white() {
    let provider = provider([0.01, 1e-5], 0.0);
    let hull_white = HullWhiteOneFactorPiecewiseConstantParameters::constant(0.05, 0.01).unwrap();
    let cap = caplet(1.0, 0.25, 0.03, true);
    let expected = hull_white_caplet(&hull_white, provider.multicurve(), &cap);
    let instrument = InstrumentDerivative::from(cap);
    let stats = over_seeds(1..9, |seed| price(&instrument, &provider, seed, 20_000));
    assert_within_error(&stats, expected, 3e-3);
}

#[test]
fn test_cap_minus_floor_is_forward() {
    let provider = provider([0.008, 0.006], -0.4);
    let cap = caplet(2.0, 0.25, 0.025, true);
    let coupon = cap.coupon().clone();
    let floor = InstrumentDerivative::from(cap.with_cap_floor_switched());
    let cap = InstrumentDerivative::from(cap);
    let stats = over_seeds(1..9, |seed| {
        price(&cap, &provider, seed, 10_000) - price(&floor, &provider, seed, 10_000)
    });
    let multicurve = provider.multicurve();
    let df = multicurve.discount_factor(&eur(), coupon.payment_time()).unwrap();
    let forward = (forward_ratio(multicurve, &coupon) - 1.0) / 0.25;
    assert_within_error(&stats, NOTIONAL * 0.25 * df * (forward - 0.025), 1e-3);
}

// ───────────────────────── swaptions ─────────────────────────

#[test]
fn test_swaption_position_flip_negates() {
    let provider = provider([0.008, 0.006], -0.4);
    let long = physical_swaption(1.0, 2, 0.028, false, Position::Long);
    let short = InstrumentDerivative::from(long.flipped());
    let long = InstrumentDerivative::from(long);
    let pv = price(&long, &provider, 21, 3_000);
    assert!(pv > 0.0);
    assert_relative_eq!(price(&short, &provider, 21, 3_000), -pv, max_relative = 1e-12);
}

#[test]
fn test_negative_correlation_lowers_swaption_value() {
    // The swap rate loads on both factors; ρ < 0 reduces its variance.
    let swaption = InstrumentDerivative::from(physical_swaption(1.0, 5, 0.03, true, Position::Long));
    let independent = provider([0.008, 0.008], 0.0);
    let anti = provider([0.008, 0.008], -0.8);
    let pv_independent = price(&swaption, &independent, 4, 20_000);
    let pv_anti = price(&swaption, &anti, 4, 20_000);
    assert!(pv_anti < pv_independent, "{pv_anti} >= {pv_independent}");
}

#[test]
fn test_cash_swaption_close_to_physical() {
    let parameters = G2ppPiecewiseConstantParameters::constant([0.05, 0.3], [0.008, 0.006], -0.4).unwrap();
    let provider = G2ppProvider::new(parameters, eur(), Arc::new(single_curve(0.03)));
    let physical = InstrumentDerivative::from(physical_swaption(1.0, 2, 0.03, true, Position::Long));
    let cash = InstrumentDerivative::from(cash_swaption(1.0, 2, 0.03, true, Position::Long));
    assert_relative_eq!(
        price(&cash, &provider, 8, 20_000),
        price(&physical, &provider, 8, 20_000),
        max_relative = 0.03
    );
}

// ───────────────────────── errors ─────────────────────────

#[test]
fn test_degenerate_covariance_is_reported() {
    let provider = provider([0.0, 0.0], 0.0);
    let cap = InstrumentDerivative::from(caplet(1.0, 0.25, 0.03, true));
    let err = G2ppMonteCarloMethod::new(InverseCumulativeNormalRng::new(1), 100)
        .present_value(&cap, &eur(), &provider)
        .unwrap_err();
    assert!(matches!(err, Error::NumericalPrecondition(_)), "{err}");
}

#[test]
fn test_coupon_unsupported() {
    let provider = provider([0.008, 0.006], 0.0);
    let coupon = InstrumentDerivative::from(ibor_coupon(1.0, 0.25, NOTIONAL));
    let err = G2ppMonteCarloMethod::new(InverseCumulativeNormalRng::new(1), 100)
        .present_value(&coupon, &eur(), &provider)
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedInstrument { .. }), "{err}");
}
