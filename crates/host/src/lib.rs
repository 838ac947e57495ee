//! Host-side collaborators of the conversion engine.
//!
//! This crate provides:
//! - JSON persistence of the user settings
//! - A single-instance guard
//! - The release update check
//! - An in-process clipboard the engine's sink writes to

pub mod clipboard;
pub mod error;
pub mod instance;
pub mod settings_store;
pub mod update;

pub use clipboard::{HostSink, SharedClipboard};
pub use error::{HostError, HostResult};
pub use instance::{InstanceGuard, LockFileGuard};
pub use settings_store::JsonSettingsStore;
pub use update::{UpdateChecker, UpdateStatus, compare_versions};
