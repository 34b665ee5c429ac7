//! European swaptions on fixed-for-Ibor swaps.

use crate::swap::SwapFixedIbor;
use irmc_core::{errors::Result, Currency, Position, Rate, Time};

/// Swaption settled by entering the underlying swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwaptionPhysicalFixedIbor {
    time_to_expiry: Time,
    underlying: SwapFixedIbor,
    position: Position,
}

impl SwaptionPhysicalFixedIbor {
    /// Create a swaption expiring at `time_to_expiry` on `underlying`.
    pub fn new(time_to_expiry: Time, underlying: SwapFixedIbor, position: Position) -> Result<Self> {
        irmc_core::ensure!(time_to_expiry >= 0.0, "expiry must not be in the past");
        Ok(Self {
            time_to_expiry,
            underlying,
            position,
        })
    }

    /// Expiry time.
    pub fn time_to_expiry(&self) -> Time {
        self.time_to_expiry
    }

    /// The swap entered at exercise.
    pub fn underlying(&self) -> &SwapFixedIbor {
        &self.underlying
    }

    /// Long or short.
    pub fn position(&self) -> Position {
        self.position
    }

    /// `true` for a payer swaption.
    pub fn is_call(&self) -> bool {
        self.underlying.is_payer()
    }

    /// Currency of the underlying swap.
    pub fn currency(&self) -> &Currency {
        self.underlying.currency()
    }

    /// Same swaption with the opposite position.
    pub fn flipped(&self) -> Self {
        Self {
            position: self.position.flip(),
            ..self.clone()
        }
    }
}

/// Swaption settled in cash at `settlement_time` using the cash annuity of
/// the underlying at the fixing swap rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SwaptionCashFixedIbor {
    time_to_expiry: Time,
    underlying: SwapFixedIbor,
    settlement_time: Time,
    position: Position,
}

impl SwaptionCashFixedIbor {
    /// Create a cash-settled swaption.
    pub fn new(
        time_to_expiry: Time,
        underlying: SwapFixedIbor,
        settlement_time: Time,
        position: Position,
    ) -> Result<Self> {
        irmc_core::ensure!(time_to_expiry >= 0.0, "expiry must not be in the past");
        irmc_core::ensure!(
            settlement_time >= time_to_expiry,
            "settlement ({settlement_time}) must not precede expiry ({time_to_expiry})"
        );
        Ok(Self {
            time_to_expiry,
            underlying,
            settlement_time,
            position,
        })
    }

    /// Expiry time.
    pub fn time_to_expiry(&self) -> Time {
        self.time_to_expiry
    }

    /// The reference swap.
    pub fn underlying(&self) -> &SwapFixedIbor {
        &self.underlying
    }

    /// Cash settlement time.
    pub fn settlement_time(&self) -> Time {
        self.settlement_time
    }

    /// Long or short.
    pub fn position(&self) -> Position {
        self.position
    }

    /// `true` for a payer swaption.
    pub fn is_call(&self) -> bool {
        self.underlying.is_payer()
    }

    /// Strike: the fixed rate of the underlying.
    pub fn strike(&self) -> Rate {
        self.underlying.fixed_rate()
    }

    /// Currency of the underlying swap.
    pub fn currency(&self) -> &Currency {
        self.underlying.currency()
    }
}
