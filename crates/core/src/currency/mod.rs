//! Exchange rate and BGN ⇄ EUR conversion.

pub mod conversion;
pub mod exchange;

#[cfg(test)]
mod props;

pub use conversion::{ConversionDirection, convert, round_commercial};
pub use exchange::{ExchangeRate, RateControl};
