//! Shared types, errors, and configuration for the BGN/EUR converter.
//!
//! This crate provides common types used across all other crates:
//! - Currency and money types with decimal precision
//! - Persisted user settings
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod settings;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use settings::UserSettings;
pub use types::{Currency, Money};
