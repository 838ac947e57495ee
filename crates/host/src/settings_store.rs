//! JSON file persistence of [`UserSettings`].

use std::fs;
use std::path::{Path, PathBuf};

use bgneur_core::ConversionDirection;
use bgneur_shared::UserSettings;
use tracing::{info, warn};

use crate::error::{HostError, HostResult};

/// Folder created under the user's configuration directory.
pub const SETTINGS_FOLDER: &str = "BGN_EUR_Converter";

/// Settings file name.
pub const SETTINGS_FILE: &str = "settings.json";

/// Settings stored as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform default location.
    pub fn at_default_location() -> HostResult<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// `<config dir>/BGN_EUR_Converter/settings.json`.
    pub fn default_path() -> HostResult<PathBuf> {
        let base = dirs::config_dir().ok_or(HostError::NoConfigDir)?;
        Ok(base.join(SETTINGS_FOLDER).join(SETTINGS_FILE))
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads settings; a missing or unreadable file yields defaults.
    #[must_use]
    pub fn load(&self) -> UserSettings {
        self.load_existing().unwrap_or_default()
    }

    /// Loads settings only when a readable file exists.
    #[must_use]
    pub fn load_existing(&self) -> Option<UserSettings> {
        match self.try_load() {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "settings unreadable, ignoring");
                None
            }
        }
    }

    /// Loads settings, surfacing errors. `None` when the file does not exist.
    pub fn try_load(&self) -> HostResult<Option<UserSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Writes settings, creating parent folders as needed.
    pub fn save(&self, settings: &UserSettings) -> HostResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Records the last used conversion direction.
    pub fn set_last_direction(&self, direction: ConversionDirection) -> HostResult<()> {
        let mut settings = self.load();
        settings.last_direction_bgn_to_eur = direction.is_bgn_to_eur();
        self.save(&settings)
    }

    /// Overwrites the file with defaults.
    pub fn reset(&self) -> HostResult<UserSettings> {
        let settings = UserSettings::default();
        self.save(&settings)?;
        Ok(settings)
    }
}
