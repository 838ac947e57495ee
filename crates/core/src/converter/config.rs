//! Immutable engine configuration.

use bgneur_shared::UserSettings;
use bgneur_shared::config::EngineSection;

use crate::currency::{ConversionDirection, ExchangeRate};
use crate::error::CoreResult;

/// Settings the engine is constructed with.
///
/// Replaced wholesale on change; the engine never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Exchange rate (1 EUR = rate BGN).
    pub rate: ExchangeRate,
    /// Push new non-zero results to the clipboard.
    pub auto_copy: bool,
    /// Report direction toggles for persistence.
    pub remember_direction: bool,
    /// Direction the converter starts in.
    pub direction: ConversionDirection,
    /// Whether the rate field starts read-only.
    pub rate_locked: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rate: ExchangeRate::FIXED_PEG,
            auto_copy: false,
            remember_direction: true,
            direction: ConversionDirection::BgnToEur,
            rate_locked: true,
        }
    }
}

impl EngineConfig {
    /// Builds the engine configuration from the config file section.
    pub fn from_section(section: &EngineSection) -> CoreResult<Self> {
        Ok(Self {
            rate: ExchangeRate::new(section.rate)?,
            auto_copy: section.auto_copy,
            remember_direction: section.remember_direction,
            direction: ConversionDirection::from_bgn_to_eur(section.bgn_to_eur),
            rate_locked: section.rate_locked,
        })
    }

    /// Builds the configuration from the config section, overlaid with the
    /// settings file when one exists.
    pub fn resolve(section: &EngineSection, stored: Option<&UserSettings>) -> CoreResult<Self> {
        let config = Self::from_section(section)?;
        Ok(match stored {
            Some(settings) => config.with_user_settings(settings),
            None => config,
        })
    }

    /// Overlays persisted user settings.
    ///
    /// A stored rate outside the accepted range is ignored and the current
    /// one kept.
    #[must_use]
    pub fn with_user_settings(self, settings: &UserSettings) -> Self {
        let rate = settings
            .exchange_rate
            .and_then(|rate| ExchangeRate::new(rate).ok())
            .unwrap_or(self.rate);
        let direction = if settings.remember_last_direction {
            ConversionDirection::from_bgn_to_eur(settings.last_direction_bgn_to_eur)
        } else {
            self.direction
        };
        Self {
            rate,
            auto_copy: settings.auto_copy_result,
            remember_direction: settings.remember_last_direction,
            direction,
            rate_locked: settings.rate_locked,
        }
    }
}
