//! Bounded textual amount built one key at a time.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Maximum number of characters an amount may hold.
pub const MAX_LEN: usize = 10;

/// Canonical decimal separator stored in the buffer.
pub const SEPARATOR: char = '.';

/// Parses amount text, falling back to zero on anything malformed.
///
/// Accepts `,` for `.`, a leading separator (`".5"` is `0.5`) and a trailing
/// one (`"12."` is `12`). Empty text is zero.
#[must_use]
pub fn parse_amount(text: &str) -> Decimal {
    let mut normalized = text.trim().replace(',', ".");
    if normalized.ends_with(SEPARATOR) {
        normalized.pop();
    }
    if normalized.starts_with(SEPARATOR) {
        normalized.insert(0, '0');
    }
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

/// Amount under construction.
///
/// Holds only ASCII digits and at most one `.`, never more than
/// [`MAX_LEN`] characters. Every mutator returns whether the text changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountBuffer {
    text: String,
}

impl AmountBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Appends a digit. Non-digits and input past the bound are ignored.
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.is_full() {
            return false;
        }
        self.text.push(digit);
        true
    }

    /// Appends the decimal separator unless one is already present.
    pub fn push_separator(&mut self) -> bool {
        if self.has_separator() || self.is_full() {
            return false;
        }
        self.text.push(SEPARATOR);
        true
    }

    /// Removes the last character.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Empties the buffer.
    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        changed
    }

    /// Numeric value; malformed or empty text reads as zero.
    #[must_use]
    pub fn value(&self) -> Decimal {
        parse_amount(&self.text)
    }

    /// True when the value is zero, including the empty buffer.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Raw text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Character count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when nothing has been typed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn is_full(&self) -> bool {
        self.text.len() >= MAX_LEN
    }

    fn has_separator(&self) -> bool {
        self.text.contains(SEPARATOR)
    }
}

impl fmt::Display for AmountBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
