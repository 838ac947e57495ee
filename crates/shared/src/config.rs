//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// The statutory BGN/EUR peg: 1 EUR = 1.95583 BGN.
pub const FIXED_PEG: Decimal = Decimal::from_parts(195_583, 0, 0, false, 5);

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Conversion engine configuration.
    pub engine: EngineSection,
    /// Update check configuration.
    pub updates: UpdatesConfig,
    /// Filesystem locations.
    pub paths: PathsConfig,
}

/// Conversion engine defaults, overridable by the persisted user settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct EngineSection {
    /// Exchange rate, BGN per one EUR.
    pub rate: Decimal,
    /// Whether the rate is read-only.
    pub rate_locked: bool,
    /// Push each new non-zero result to the clipboard.
    pub auto_copy: bool,
    /// Persist the direction on every toggle.
    pub remember_direction: bool,
    /// Start in BGN → EUR direction.
    pub bgn_to_eur: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            rate: FIXED_PEG,
            rate_locked: true,
            auto_copy: true,
            remember_direction: true,
            bgn_to_eur: true,
        }
    }
}

/// Update check configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpdatesConfig {
    /// Whether the update check runs at all.
    pub enabled: bool,
    /// Endpoint returning the latest release metadata.
    pub releases_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UpdatesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            releases_url: default_releases_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_releases_url() -> String {
    "https://api.github.com/repos/zdravkopavlov/Currency-Coverter/releases/latest".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Filesystem locations. Unset paths fall back to platform defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Settings JSON file.
    pub settings_file: Option<PathBuf>,
    /// Single-instance lock file.
    pub lock_file: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BGNEUR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
