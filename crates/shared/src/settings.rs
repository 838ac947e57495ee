//! Persisted user settings.
//!
//! Mirrors the JSON document the desktop widget keeps in the user's
//! configuration directory. Every field has a default so older or partial
//! files still load.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Theme selection as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Theme {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the operating system.
    #[default]
    System,
}

impl From<u8> for Theme {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Light,
            1 => Self::Dark,
            _ => Self::System,
        }
    }
}

impl From<Theme> for u8 {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => 0,
            Theme::Dark => 1,
            Theme::System => 2,
        }
    }
}

/// User settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct UserSettings {
    /// Launch at login.
    pub start_with_windows: bool,
    /// Start hidden in the tray.
    pub start_minimized: bool,
    /// Keep the window above others.
    pub always_on_top: bool,
    /// Theme selection.
    pub theme: Theme,
    /// Check for updates on start.
    pub auto_check_updates: bool,
    /// Copy each new result to the clipboard.
    pub auto_copy_result: bool,
    /// Persist the conversion direction on toggle.
    pub remember_last_direction: bool,
    /// Last direction used; `true` means BGN → EUR.
    pub last_direction_bgn_to_eur: bool,
    /// Last window position.
    pub x: Option<i32>,
    /// Last window position.
    pub y: Option<i32>,
    /// Compact one-line layout.
    pub minimal_mode: bool,
    /// User-edited exchange rate, if any.
    pub exchange_rate: Option<Decimal>,
    /// Whether the exchange rate field is read-only.
    pub rate_locked: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            start_with_windows: false,
            start_minimized: true,
            always_on_top: true,
            theme: Theme::System,
            auto_check_updates: true,
            auto_copy_result: true,
            remember_last_direction: true,
            last_direction_bgn_to_eur: true,
            x: None,
            y: None,
            minimal_mode: false,
            exchange_rate: None,
            rate_locked: true,
        }
    }
}
