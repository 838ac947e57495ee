//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for the cashier widget:
//! - Always round to 2 decimal places
//! - Use commercial rounding (round half away from zero)
//! - Divide and multiply on exact decimals, never on floats

use bgneur_shared::Currency;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::exchange::ExchangeRate;

/// Decimal places of every converted amount.
pub const RESULT_DECIMALS: u32 = 2;

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionDirection {
    /// Amount is entered in leva, result in euro.
    #[default]
    BgnToEur,
    /// Amount is entered in euro, result in leva.
    EurToBgn,
}

impl ConversionDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::BgnToEur => Self::EurToBgn,
            Self::EurToBgn => Self::BgnToEur,
        }
    }

    /// Currency the amount is entered in.
    #[must_use]
    pub const fn source(self) -> Currency {
        match self {
            Self::BgnToEur => Currency::Bgn,
            Self::EurToBgn => Currency::Eur,
        }
    }

    /// Currency the result is shown in.
    #[must_use]
    pub const fn target(self) -> Currency {
        self.source().counterpart()
    }

    /// Maps the persisted `last_direction_bgn_to_eur` flag.
    #[must_use]
    pub const fn from_bgn_to_eur(flag: bool) -> Self {
        if flag { Self::BgnToEur } else { Self::EurToBgn }
    }

    /// Returns true for BGN → EUR.
    #[must_use]
    pub const fn is_bgn_to_eur(self) -> bool {
        matches!(self, Self::BgnToEur)
    }
}

/// Rounds to `decimal_places` with half away from zero.
#[must_use]
pub fn round_commercial(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an amount between leva and euro.
///
/// BGN → EUR divides by the rate, EUR → BGN multiplies by it. The result is
/// rounded to 2 decimals, half away from zero, which is what a cashier
/// expects at the till.
#[must_use]
pub fn convert(amount: Decimal, rate: ExchangeRate, direction: ConversionDirection) -> Decimal {
    convert_decimal(amount, rate.value(), direction)
}

/// Conversion over a raw rate. Overflow yields zero instead of panicking.
pub(super) fn convert_decimal(
    amount: Decimal,
    rate: Decimal,
    direction: ConversionDirection,
) -> Decimal {
    let raw = match direction {
        ConversionDirection::BgnToEur => amount.checked_div(rate),
        ConversionDirection::EurToBgn => amount.checked_mul(rate),
    };
    match raw {
        Some(raw) => round_commercial(raw, RESULT_DECIMALS),
        None => {
            warn!(%amount, %rate, ?direction, "conversion overflowed, showing zero");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(100), ConversionDirection::BgnToEur, dec!(51.13))]
    #[case(dec!(10), ConversionDirection::EurToBgn, dec!(19.56))]
    #[case(dec!(5), ConversionDirection::BgnToEur, dec!(2.56))]
    #[case(dec!(1.95583), ConversionDirection::BgnToEur, dec!(1.00))]
    #[case(dec!(1), ConversionDirection::EurToBgn, dec!(1.96))]
    fn test_convert_at_fixed_peg(
        #[case] amount: Decimal,
        #[case] direction: ConversionDirection,
        #[case] expected: Decimal,
    ) {
        assert_eq!(convert(amount, ExchangeRate::default(), direction), expected);
    }

    #[test]
    fn test_convert_zero_is_zero() {
        let rate = ExchangeRate::default();
        assert_eq!(convert(Decimal::ZERO, rate, ConversionDirection::BgnToEur), dec!(0.00));
        assert_eq!(convert(Decimal::ZERO, rate, ConversionDirection::EurToBgn), dec!(0.00));
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // Exact midpoints that binary floats would round down.
        let unit = ExchangeRate::new(Decimal::ONE).unwrap();
        assert_eq!(convert(dec!(1.005), unit, ConversionDirection::EurToBgn), dec!(1.01));
        assert_eq!(convert(dec!(2.675), unit, ConversionDirection::BgnToEur), dec!(2.68));
    }

    #[rstest]
    #[case(dec!(9999999999), Decimal::new(1, 28), ConversionDirection::BgnToEur)]
    #[case(dec!(2), Decimal::MAX, ConversionDirection::EurToBgn)]
    #[case(Decimal::MAX, dec!(0.5), ConversionDirection::BgnToEur)]
    #[case(dec!(1), Decimal::ZERO, ConversionDirection::BgnToEur)]
    fn test_overflow_yields_zero(
        #[case] amount: Decimal,
        #[case] rate: Decimal,
        #[case] direction: ConversionDirection,
    ) {
        assert_eq!(convert_decimal(amount, rate, direction), Decimal::ZERO);
    }

    #[test]
    fn test_round_commercial_half_away_from_zero() {
        assert_eq!(round_commercial(dec!(2.5), 0), dec!(3));
        assert_eq!(round_commercial(dec!(3.5), 0), dec!(4));
        assert_eq!(round_commercial(dec!(2.25), 1), dec!(2.3));
        assert_eq!(round_commercial(dec!(-2.25), 1), dec!(-2.3));
    }

    #[test]
    fn test_direction_currencies() {
        assert_eq!(ConversionDirection::BgnToEur.source(), Currency::Bgn);
        assert_eq!(ConversionDirection::BgnToEur.target(), Currency::Eur);
        assert_eq!(ConversionDirection::EurToBgn.source(), Currency::Eur);
        assert_eq!(ConversionDirection::EurToBgn.target(), Currency::Bgn);
    }

    #[test]
    fn test_direction_toggle_is_involution() {
        let d = ConversionDirection::BgnToEur;
        assert_eq!(d.toggled(), ConversionDirection::EurToBgn);
        assert_eq!(d.toggled().toggled(), d);
        assert_eq!(ConversionDirection::from_bgn_to_eur(false), ConversionDirection::EurToBgn);
        assert!(ConversionDirection::from_bgn_to_eur(true).is_bgn_to_eur());
    }
}
