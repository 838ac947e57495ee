//! One-shot command handlers.

use std::str::FromStr;

use bgneur_core::{
    ConversionDirection, EngineConfig, ExchangeRate, assess_payment, calculate_change, convert,
};
use bgneur_host::{JsonSettingsStore, UpdateChecker, UpdateStatus};
use bgneur_shared::config::UpdatesConfig;
use bgneur_shared::{AppError, AppResult, Currency, Money, UserSettings};
use rust_decimal::Decimal;

use crate::cli::Target;
use crate::session::render_change;

/// Parses an amount typed on the command line.
///
/// Unlike key entry, a command-line amount that is not a non-negative
/// number is an error.
pub fn parse_cli_amount(text: &str) -> AppResult<Decimal> {
    let normalized = text.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized)
        .map_err(|_| AppError::Validation(format!("not an amount: '{text}'")))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::Validation(format!("amount is negative: '{text}'")));
    }
    Ok(amount)
}

/// Resolves the rate: command line, then the engine configuration.
pub fn resolve_rate(flag: Option<&str>, fallback: ExchangeRate) -> AppResult<ExchangeRate> {
    flag.map_or(Ok(fallback), |text| {
        ExchangeRate::parse(text).map_err(AppError::from)
    })
}

/// `bgneur convert`.
pub fn convert_command(amount: &str, to: Target, config: &EngineConfig) -> AppResult<String> {
    let amount = parse_cli_amount(amount)?;
    let direction = match to {
        Target::Eur => ConversionDirection::BgnToEur,
        Target::Bgn => ConversionDirection::EurToBgn,
    };
    let input = Money::new(amount, direction.source());
    let output = Money::new(convert(amount, config.rate, direction), direction.target());
    Ok(format!("{input} = {output}"))
}

/// `bgneur change`.
pub fn change_command(price: &str, paid: &str, config: &EngineConfig) -> AppResult<String> {
    let price = parse_cli_amount(price)?;
    let paid = parse_cli_amount(paid)?;
    let change = Money::new(calculate_change(price, paid, config.rate), Currency::Eur);
    let display = bgneur_core::ChangeDisplay {
        paid_display: Money::new(paid, Currency::Bgn).to_string(),
        change_display: change.to_string(),
        change_raw: change.plain(),
        change,
        status: assess_payment(price, paid),
    };
    Ok(render_change(price, &display))
}

/// `bgneur check-update`.
pub async fn check_update_command(config: &UpdatesConfig) -> AppResult<String> {
    let checker = UpdateChecker::new(config, env!("CARGO_PKG_VERSION"))?;
    Ok(match checker.check().await? {
        UpdateStatus::UpToDate { latest } => {
            format!("up to date ({} installed, {latest} published)", env!("CARGO_PKG_VERSION"))
        }
        UpdateStatus::Available(info) => {
            let mut out = format!("new version {} available: {}", info.version, info.page_url);
            if let Some(url) = info.installer_url {
                out.push_str(&format!("\ninstaller: {url}"));
            }
            out
        }
    })
}

/// `bgneur settings show`.
pub fn show_settings(settings: &UserSettings) -> AppResult<String> {
    serde_json::to_string_pretty(settings).map_err(|err| AppError::Internal(err.to_string()))
}

/// `bgneur settings reset`.
pub fn reset_settings(store: &JsonSettingsStore) -> AppResult<String> {
    store.reset()?;
    Ok(format!("settings reset: {}", store.path().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("12.5", dec!(12.5))]
    #[case("12,5", dec!(12.5))]
    #[case(" 3 ", dec!(3))]
    #[case("0", dec!(0))]
    fn test_parse_cli_amount(#[case] text: &str, #[case] expected: Decimal) {
        assert_eq!(parse_cli_amount(text).unwrap(), expected);
    }

    #[rstest]
    #[case("abc")]
    #[case("-1")]
    #[case("")]
    fn test_parse_cli_amount_rejects(#[case] text: &str) {
        assert!(matches!(parse_cli_amount(text), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_convert_command() {
        let config = EngineConfig::default();
        assert_eq!(
            convert_command("100", Target::Eur, &config).unwrap(),
            "100.00 лв. = €51.13"
        );
        assert_eq!(
            convert_command("10", Target::Bgn, &config).unwrap(),
            "€10.00 = 19.56 лв."
        );
    }

    #[test]
    fn test_change_command() {
        let config = EngineConfig::default();
        assert_eq!(
            change_command("10", "10", &config).unwrap(),
            "price 10.00 лв. | paid 10.00 лв. | change €0.00 (exact)"
        );
        assert_eq!(
            change_command("10", "15", &config).unwrap(),
            "price 10.00 лв. | paid 15.00 лв. | change €2.56 (change due)"
        );
    }

    #[test]
    fn test_resolve_rate() {
        let fallback = ExchangeRate::default();
        assert_eq!(resolve_rate(None, fallback).unwrap(), fallback);
        assert_eq!(resolve_rate(Some("2,5"), fallback).unwrap().value(), dec!(2.5));
        assert!(matches!(
            resolve_rate(Some("0"), fallback),
            Err(AppError::Validation(_))
        ));
    }
}
