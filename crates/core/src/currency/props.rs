//! Property-based tests for currency conversion.
//!
//! - Zero converts to zero
//! - Results carry at most 2 decimals
//! - Round trips stay within the double-rounding bound

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::conversion::{ConversionDirection, convert, convert_decimal};
use super::exchange::ExchangeRate;

/// Strategy to generate amounts from 0.01 to 99,999.99.
fn till_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 100.0000).
fn positive_rate() -> impl Strategy<Value = ExchangeRate> {
    (1i64..1_000_000i64).prop_map(|v| ExchangeRate::new(Decimal::new(v, 4)).unwrap())
}

/// Strategy covering every accepted rate (0.0001 to 10,000.0000).
fn any_accepted_rate() -> impl Strategy<Value = ExchangeRate> {
    (1i64..=100_000_000i64).prop_map(|v| ExchangeRate::new(Decimal::new(v, 4)).unwrap())
}

/// Strategy for anything the 10-character buffer can hold.
fn buffer_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=9_999_999_999i64, 0u32..=9).prop_map(|(digits, scale)| Decimal::new(digits, scale))
}

/// Strategy for arbitrary decimals, sign and scale included.
fn any_decimal() -> impl Strategy<Value = Decimal> {
    (any::<i64>(), 0u32..=28).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn direction() -> impl Strategy<Value = ConversionDirection> {
    prop_oneof![
        Just(ConversionDirection::BgnToEur),
        Just(ConversionDirection::EurToBgn),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Zero in, zero out, for any rate and direction.
    #[test]
    fn prop_zero_converts_to_zero(rate in positive_rate(), dir in direction()) {
        prop_assert_eq!(convert(Decimal::ZERO, rate, dir), Decimal::ZERO);
    }

    /// Results never carry more than 2 decimal places.
    #[test]
    fn prop_result_has_two_decimals(
        amount in till_amount(),
        rate in positive_rate(),
        dir in direction(),
    ) {
        let result = convert(amount, rate, dir);
        prop_assert_eq!(result, result.round_dp(2));
    }

    /// Conversion is deterministic.
    #[test]
    fn prop_convert_is_deterministic(
        amount in till_amount(),
        dir in direction(),
    ) {
        let rate = ExchangeRate::default();
        prop_assert_eq!(convert(amount, rate, dir), convert(amount, rate, dir));
    }

    /// EUR -> BGN -> EUR recovers the amount within one cent.
    #[test]
    fn prop_round_trip_from_eur(amount in till_amount()) {
        let rate = ExchangeRate::default();
        let bgn = convert(amount, rate, ConversionDirection::EurToBgn);
        let back = convert(bgn, rate, ConversionDirection::BgnToEur);
        prop_assert!((back - amount).abs() <= dec!(0.01), "{} -> {} -> {}", amount, bgn, back);
    }

    /// BGN -> EUR -> BGN recovers the amount within the double-rounding bound.
    ///
    /// The intermediate euro value is off by up to half a cent, which the
    /// multiplication scales by the rate before the final rounding adds
    /// another half cent.
    #[test]
    fn prop_round_trip_from_bgn(amount in till_amount()) {
        let rate = ExchangeRate::default();
        let bound = dec!(0.005) * rate.value() + dec!(0.005);
        let eur = convert(amount, rate, ConversionDirection::BgnToEur);
        let back = convert(eur, rate, ConversionDirection::EurToBgn);
        prop_assert!((back - amount).abs() <= bound, "{} -> {} -> {}", amount, eur, back);
    }

    /// Every buffer amount converts at every accepted rate without overflow.
    #[test]
    fn prop_accepted_rates_never_overflow(
        amount in buffer_amount(),
        rate in any_accepted_rate(),
        dir in direction(),
    ) {
        let exact = match dir {
            ConversionDirection::BgnToEur => amount.checked_div(rate.value()),
            ConversionDirection::EurToBgn => amount.checked_mul(rate.value()),
        };
        prop_assert!(exact.is_some());
        let result = convert(amount, rate, dir);
        prop_assert_eq!(result, result.round_dp(2));
    }

    /// Raw conversion is total over any pair of decimals.
    #[test]
    fn prop_raw_conversion_never_panics(
        amount in any_decimal(),
        rate in any_decimal(),
        dir in direction(),
    ) {
        let result = convert_decimal(amount, rate, dir);
        prop_assert_eq!(result, result.round_dp(2));
    }

    /// Larger amounts never convert to smaller results.
    #[test]
    fn prop_convert_is_monotonic(
        a in till_amount(),
        b in till_amount(),
        dir in direction(),
    ) {
        let rate = ExchangeRate::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(convert(lo, rate, dir) <= convert(hi, rate, dir));
    }
}
