//! `Payment` trait and the fixed payment.

use irmc_core::{Currency, Real, Time};
use std::fmt;

/// Anything paid at a single time.
pub trait Payment: fmt::Debug + Send + Sync {
    /// Currency of the payment.
    fn currency(&self) -> &Currency;

    /// Payment time in years from the valuation date.
    fn payment_time(&self) -> Time;
}

/// A known amount paid at a known time.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentFixed {
    currency: Currency,
    payment_time: Time,
    amount: Real,
}

impl PaymentFixed {
    /// Create a new fixed payment.
    pub fn new(currency: Currency, payment_time: Time, amount: Real) -> Self {
        Self {
            currency,
            payment_time,
            amount,
        }
    }

    /// The amount paid.
    pub fn amount(&self) -> Real {
        self.amount
    }
}

impl Payment for PaymentFixed {
    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn payment_time(&self) -> Time {
        self.payment_time
    }
}
