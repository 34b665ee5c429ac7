//! Currency codes and currency-tagged amounts.
//!
//! Pricing only needs a currency as a key to find the discounting curve, so
//! the type is reduced to its ISO code.

use crate::Real;

/// An ISO 4217 currency identified by its three-letter code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency {
    code: String,
}

impl Currency {
    /// Create a currency from its code (e.g. `"EUR"`).
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// The ISO code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Euro.
    pub fn eur() -> Self {
        Self::new("EUR")
    }

    /// US dollar.
    pub fn usd() -> Self {
        Self::new("USD")
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// An amount expressed in a given currency.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyAmount {
    /// The currency of the amount.
    pub currency: Currency,
    /// The amount.
    pub amount: Real,
}

impl CurrencyAmount {
    /// Create a new amount.
    pub fn new(currency: Currency, amount: Real) -> Self {
        Self { currency, amount }
    }
}

impl std::fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}
