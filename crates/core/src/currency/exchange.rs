//! Exchange rate types and logic.

use std::fmt;
use std::str::FromStr;

use bgneur_shared::config::FIXED_PEG;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Smallest accepted rate, 0.0001.
pub const MIN_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// Largest accepted rate, 10000.
pub const MAX_RATE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Exchange rate between leva and euro (1 EUR = rate BGN).
///
/// Always within [`MIN_RATE`, `MAX_RATE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// The statutory peg, 1.95583.
    pub const FIXED_PEG: Self = Self(FIXED_PEG);

    /// Creates a rate, rejecting values outside [`MIN_RATE`, `MAX_RATE`].
    pub fn new(rate: Decimal) -> CoreResult<Self> {
        if !(MIN_RATE..=MAX_RATE).contains(&rate) {
            return Err(CoreError::InvalidRate(rate.to_string()));
        }
        Ok(Self(rate))
    }

    /// Parses user-typed rate text.
    ///
    /// Both `.` and `,` are accepted as the decimal separator.
    pub fn parse(text: &str) -> CoreResult<Self> {
        let normalized = text.trim().replace(',', ".");
        let rate = Decimal::from_str(&normalized)
            .map_err(|_| CoreError::InvalidRate(text.trim().to_string()))?;
        Self::new(rate)
    }

    /// Returns the rate as a decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::FIXED_PEG
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

impl FromStr for ExchangeRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of the editable rate field.
///
/// Locked by default. A rejected update keeps the previous valid rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateControl {
    rate: ExchangeRate,
    locked: bool,
}

impl RateControl {
    /// Creates a control holding `rate`.
    #[must_use]
    pub const fn new(rate: ExchangeRate, locked: bool) -> Self {
        Self { rate, locked }
    }

    /// Current rate.
    #[must_use]
    pub const fn rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Whether edits are refused.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Flips the lock and returns the new state.
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        debug!(locked = self.locked, "rate lock toggled");
        self.locked
    }

    /// Applies rate text typed by the user.
    pub fn set_from_text(&mut self, text: &str) -> CoreResult<ExchangeRate> {
        if self.locked {
            return Err(CoreError::RateLocked);
        }
        let rate = ExchangeRate::parse(text)?;
        self.rate = rate;
        debug!(%rate, "exchange rate updated");
        Ok(rate)
    }
}

impl Default for RateControl {
    fn default() -> Self {
        Self::new(ExchangeRate::FIXED_PEG, true)
    }
}
