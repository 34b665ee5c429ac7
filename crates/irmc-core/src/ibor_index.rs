//! Ibor index description.

use crate::currency::Currency;

/// An Ibor-like index.
///
/// Only the attributes needed to locate the forward curve are kept: the
/// index name (the key of its forward curve) and its currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IborIndex {
    name: String,
    currency: Currency,
}

impl IborIndex {
    /// Create a new index.
    pub fn new(name: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            currency,
        }
    }

    /// Index name, e.g. `"EURIBOR3M"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}

impl std::fmt::Display for IborIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
