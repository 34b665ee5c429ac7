//! Market data, instruments and closed forms shared by the integration
//! tests.

#![allow(dead_code)]

use irmc_cashflows::{fixed_leg, ibor_leg, CouponIbor, LegSchedule};
use irmc_core::{Currency, IborIndex, Position, Real, Time};
use irmc_instruments::{CapFloorIbor, SwapFixedIbor, SwaptionCashFixedIbor, SwaptionPhysicalFixedIbor};
use irmc_math::{normal_cdf, Statistics};
use irmc_models::HullWhiteOneFactorPiecewiseConstantParameters;
use irmc_termstructures::{MulticurveProvider, MulticurveProviderDiscount, YieldCurve};

pub const NOTIONAL: Real = 1_000_000.0;
pub const DSC_NAME: &str = "EUR-DSC";
pub const FWD_NAME: &str = "EUR-EURIBOR3M";

pub fn eur() -> Currency {
    Currency::eur()
}

pub fn euribor() -> IborIndex {
    IborIndex::new("EURIBOR3M", eur())
}

/// Upward sloping discounting curve and a forward curve 40bp above it.
pub fn multicurve() -> MulticurveProviderDiscount {
    let times = [0.5, 1.0, 2.0, 3.0, 5.0];
    let dsc = YieldCurve::new(DSC_NAME, &times, &[0.020, 0.022, 0.025, 0.027, 0.030]).unwrap();
    let fwd = YieldCurve::new(FWD_NAME, &times, &[0.024, 0.026, 0.029, 0.031, 0.034]).unwrap();
    MulticurveProviderDiscount::new()
        .with_discount_curve(eur(), dsc)
        .with_forward_curve(&euribor(), fwd)
}

/// Same flat curve for discounting and forwarding.
pub fn single_curve(rate: Real) -> MulticurveProviderDiscount {
    MulticurveProviderDiscount::new()
        .with_discount_curve(eur(), YieldCurve::flat(DSC_NAME, rate).unwrap())
        .with_forward_curve(&euribor(), YieldCurve::flat(FWD_NAME, rate).unwrap())
}

pub fn ibor_coupon(fixing: Time, accrual: Time, notional: Real) -> CouponIbor {
    CouponIbor::new(
        eur(),
        fixing + accrual,
        accrual,
        notional,
        euribor(),
        fixing,
        fixing,
        fixing + accrual,
        accrual,
    )
}

pub fn caplet(fixing: Time, accrual: Time, strike: Real, is_cap: bool) -> CapFloorIbor {
    CapFloorIbor::new(ibor_coupon(fixing, accrual, NOTIONAL), strike, is_cap)
}

/// Swap starting at `start` with semi-annual fixed and quarterly Ibor legs.
pub fn swap(start: Time, nb_years: usize, rate: Real, is_payer: bool) -> SwapFixedIbor {
    let fixed = fixed_leg(
        eur(),
        LegSchedule::new(start, 0.5, 2 * nb_years),
        NOTIONAL,
        rate,
        is_payer,
    )
    .unwrap();
    let ibor = ibor_leg(
        &euribor(),
        LegSchedule::new(start, 0.25, 4 * nb_years),
        NOTIONAL,
        !is_payer,
    )
    .unwrap();
    SwapFixedIbor::new(fixed, ibor).unwrap()
}

pub fn physical_swaption(
    expiry: Time,
    nb_years: usize,
    rate: Real,
    is_payer: bool,
    position: Position,
) -> SwaptionPhysicalFixedIbor {
    SwaptionPhysicalFixedIbor::new(expiry, swap(expiry, nb_years, rate, is_payer), position).unwrap()
}

pub fn cash_swaption(
    expiry: Time,
    nb_years: usize,
    rate: Real,
    is_payer: bool,
    position: Position,
) -> SwaptionCashFixedIbor {
    SwaptionCashFixedIbor::new(expiry, swap(expiry, nb_years, rate, is_payer), expiry, position).unwrap()
}

/// `(1 + δ·F)` of the forward curve over the fixing period of `coupon`.
pub fn forward_ratio(multicurve: &dyn MulticurveProvider, coupon: &CouponIbor) -> Real {
    let forward = multicurve
        .simply_compounded_forward_rate(
            coupon.index(),
            coupon.fixing_period_start_time(),
            coupon.fixing_period_end_time(),
            coupon.fixing_accrual_factor(),
        )
        .unwrap();
    1.0 + coupon.fixing_accrual_factor() * forward
}

/// Hull-White caplet/floorlet: the ratio `(1 + δL)` is lognormal with
/// log-variance `α²` under the payment forward measure.
pub fn hull_white_caplet(
    parameters: &HullWhiteOneFactorPiecewiseConstantParameters,
    multicurve: &dyn MulticurveProvider,
    cap: &CapFloorIbor,
) -> Real {
    let coupon = cap.coupon();
    let x0 = forward_ratio(multicurve, coupon);
    let delta = coupon.fixing_accrual_factor();
    let k = 1.0 + delta * cap.strike();
    let alpha = parameters.alpha(
        0.0,
        coupon.fixing_time(),
        coupon.fixing_period_start_time(),
        coupon.fixing_period_end_time(),
    );
    let omega = cap.omega();
    let d1 = ((x0 / k).ln() + alpha * alpha / 2.0) / alpha;
    let d2 = d1 - alpha;
    let df = multicurve.discount_factor(&eur(), cap.payment_time()).unwrap();
    cap.notional() * cap.payment_year_fraction() / delta
        * df
        * omega
        * (x0 * normal_cdf(omega * d1) - k * normal_cdf(omega * d2))
}

/// Black formula on displaced forward and strike.
pub fn displaced_black(forward: Real, strike: Real, displacement: Real, variance: Real, omega: Real) -> Real {
    let f = forward + displacement;
    let k = strike + displacement;
    let sd = variance.sqrt();
    let d1 = ((f / k).ln() + variance / 2.0) / sd;
    let d2 = d1 - sd;
    omega * (f * normal_cdf(omega * d1) - k * normal_cdf(omega * d2))
}

/// Statistics of `price(seed)` over `seeds`.
pub fn over_seeds(seeds: std::ops::Range<u64>, mut price: impl FnMut(u64) -> Real) -> Statistics {
    let mut stats = Statistics::new();
    for seed in seeds {
        stats.add(price(seed));
    }
    stats
}

/// Assert the Monte Carlo mean is within four standard errors (plus a
/// relative slack) of `expected`.
pub fn assert_within_error(stats: &Statistics, expected: Real, relative_slack: Real) {
    let mean = stats.mean().unwrap();
    let error = stats.error_estimate().unwrap();
    let tolerance = 4.0 * error + relative_slack * expected.abs();
    assert!(
        (mean - expected).abs() < tolerance,
        "Monte Carlo mean {mean} vs expected {expected}: difference {} above tolerance {tolerance} (std error {error})",
        (mean - expected).abs()
    );
}
