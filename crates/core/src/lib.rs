//! Conversion engine for the BGN/EUR converter.
//!
//! This crate contains the pure engine with ZERO filesystem or network
//! dependencies. Every event is handled synchronously and immediately yields
//! the new display state.
//!
//! # Modules
//!
//! - `currency` - Exchange rate and the conversion function
//! - `entry` - Key-by-key amount entry buffer
//! - `converter` - BGN ⇄ EUR converter state machine
//! - `change` - Change-due calculator
//! - `keys` - Key events shared by both pages

pub mod change;
pub mod converter;
pub mod currency;
pub mod entry;
pub mod error;
pub mod keys;

pub use change::{ChangeCalculator, ChangeDisplay, PaymentStatus, assess_payment, calculate_change};
pub use converter::{ConversionResult, Converter, EngineConfig, NoopSink, OutputSink};
pub use currency::{ConversionDirection, ExchangeRate, RateControl, convert};
pub use entry::AmountBuffer;
pub use error::{CoreError, CoreResult};
pub use keys::Key;
