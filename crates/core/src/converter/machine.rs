//! Converter state machine.
//!
//! A Mealy machine over `{ direction, buffer }`: every event mutates the
//! state and immediately yields the new [`ConversionResult`]. There is no
//! error state; malformed text reads as zero.

use std::fmt;

use bgneur_shared::Money;
use bgneur_shared::types::money::format_plain;
use rust_decimal::Decimal;
use tracing::debug;

use super::config::EngineConfig;
use super::sink::{CopyTracker, OutputSink};
use crate::currency::{ConversionDirection, ExchangeRate, convert};
use crate::entry::AmountBuffer;
use crate::keys::Key;

/// Display state derived after every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Entered amount with the source currency mark, e.g. `"100.00 лв."`.
    pub input_display: String,
    /// Converted amount with the target currency mark, e.g. `"€51.13"`.
    pub output_display: String,
    /// Converted amount alone, e.g. `"51.13"`. This is what gets copied.
    pub output_raw: String,
    /// Converted amount.
    pub output: Money,
}

impl ConversionResult {
    fn compute(value: Decimal, rate: ExchangeRate, direction: ConversionDirection) -> Self {
        let input = Money::new(value, direction.source());
        let output = Money::new(convert(value, rate, direction), direction.target());
        Self {
            input_display: input.to_string(),
            output_display: output.to_string(),
            output_raw: format_plain(output.amount),
            output,
        }
    }
}

/// The converter page engine.
pub struct Converter {
    config: EngineConfig,
    direction: ConversionDirection,
    buffer: AmountBuffer,
    copies: CopyTracker,
    sink: Box<dyn OutputSink>,
}

impl Converter {
    /// Creates a converter in the configured start direction.
    #[must_use]
    pub fn new(config: EngineConfig, sink: Box<dyn OutputSink>) -> Self {
        Self {
            direction: config.direction,
            config,
            buffer: AmountBuffer::new(),
            copies: CopyTracker::default(),
            sink,
        }
    }

    /// Current direction.
    #[must_use]
    pub const fn direction(&self) -> ConversionDirection {
        self.direction
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Entered text.
    #[must_use]
    pub fn buffer(&self) -> &AmountBuffer {
        &self.buffer
    }

    /// Appends a digit.
    pub fn on_digit(&mut self, digit: char) -> ConversionResult {
        self.buffer.push_digit(digit);
        self.recompute()
    }

    /// Appends the decimal separator.
    pub fn on_separator(&mut self) -> ConversionResult {
        self.buffer.push_separator();
        self.recompute()
    }

    /// Drops the last character.
    pub fn on_backspace(&mut self) -> ConversionResult {
        self.buffer.backspace();
        self.recompute()
    }

    /// Empties the entry.
    pub fn on_clear(&mut self) -> ConversionResult {
        self.buffer.clear();
        self.recompute()
    }

    /// Switches direction and discards the entry.
    pub fn on_toggle_direction(&mut self) -> ConversionResult {
        self.direction = self.direction.toggled();
        self.buffer.clear();
        debug!(direction = ?self.direction, "conversion direction toggled");
        if self.config.remember_direction {
            self.sink.direction_changed(self.direction);
        }
        self.recompute()
    }

    /// Clears a non-zero entry.
    ///
    /// Returns false when the entry already reads zero, so a host can treat a
    /// second escape as "leave the page".
    pub fn clear_if_not_zero(&mut self) -> bool {
        if self.buffer.is_zero() {
            return false;
        }
        self.on_clear();
        true
    }

    /// Dispatches a key press.
    pub fn handle_key(&mut self, key: Key) -> ConversionResult {
        match key {
            Key::Digit(d) => self.on_digit(d),
            Key::Separator => self.on_separator(),
            Key::Backspace => self.on_backspace(),
            Key::Escape => self.on_clear(),
            Key::Toggle => self.on_toggle_direction(),
        }
    }

    /// Replaces the configuration, keeping direction and entry.
    pub fn apply_config(&mut self, config: EngineConfig) -> ConversionResult {
        self.config = config;
        self.recompute()
    }

    /// Read-only projection for rendering.
    #[must_use]
    pub fn display(&self) -> ConversionResult {
        ConversionResult::compute(self.buffer.value(), self.config.rate, self.direction)
    }

    /// The value eligible for clipboard export.
    #[must_use]
    pub fn copyable_result(&self) -> String {
        self.display().output_raw
    }

    fn recompute(&mut self) -> ConversionResult {
        let result = self.display();
        if self.config.auto_copy {
            self.copies.offer(
                &result.output_raw,
                result.output.is_zero(),
                self.sink.as_mut(),
            );
        }
        result
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .field("direction", &self.direction)
            .field("buffer", &self.buffer)
            .field("copies", &self.copies)
            .finish_non_exhaustive()
    }
}
