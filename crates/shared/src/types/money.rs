//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places every amount is shown with.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g., leva, euro).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

/// Currencies handled by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Bulgarian Lev, the base currency.
    Bgn,
    /// Euro, the target currency.
    Eur,
}

impl Currency {
    /// Returns the symbol used when rendering amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Bgn => "лв.",
            Self::Eur => "€",
        }
    }

    /// Returns the other currency of the pair.
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Bgn => Self::Eur,
            Self::Eur => Self::Bgn,
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns the bare amount with exactly two decimals, e.g. `"51.13"`.
    #[must_use]
    pub fn plain(&self) -> String {
        format_plain(self.amount)
    }
}

/// Formats an amount with exactly two decimals, rounding half away from zero.
#[must_use]
pub fn format_plain(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(
        DISPLAY_DECIMALS,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{rounded:.2}")
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency {
            Currency::Bgn => write!(f, "{} {}", self.plain(), Currency::Bgn.symbol()),
            Currency::Eur => write!(f, "{}{}", Currency::Eur.symbol(), self.plain()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bgn => write!(f, "BGN"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BGN" | "ЛВ" | "ЛВ." => Ok(Self::Bgn),
            "EUR" | "€" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
