//! Change-due calculation and the paid-amount entry page.

use std::fmt;

use bgneur_shared::types::money::format_plain;
use bgneur_shared::{Currency, Money};
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{ChangeDisplay, PaymentStatus};
use crate::converter::{CopyTracker, EngineConfig, OutputSink};
use crate::currency::{ConversionDirection, ExchangeRate, convert};
use crate::entry::AmountBuffer;
use crate::keys::Key;

/// Change owed in euro for a leva price and payment.
///
/// Zero whenever either amount is not positive or the payment falls short.
#[must_use]
pub fn calculate_change(price_base: Decimal, paid_base: Decimal, rate: ExchangeRate) -> Decimal {
    if price_base <= Decimal::ZERO || paid_base <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let change_base = paid_base - price_base;
    if change_base < Decimal::ZERO {
        return Decimal::ZERO;
    }
    convert(change_base, rate, ConversionDirection::BgnToEur)
}

/// Classifies a payment against a price.
#[must_use]
pub fn assess_payment(price_base: Decimal, paid_base: Decimal) -> PaymentStatus {
    if price_base <= Decimal::ZERO || paid_base <= Decimal::ZERO {
        return PaymentStatus::Pending;
    }
    match paid_base.cmp(&price_base) {
        std::cmp::Ordering::Less => PaymentStatus::Insufficient,
        std::cmp::Ordering::Equal => PaymentStatus::Exact,
        std::cmp::Ordering::Greater => PaymentStatus::ChangeDue,
    }
}

/// The change page engine: an externally set price and a paid-amount entry.
pub struct ChangeCalculator {
    rate: ExchangeRate,
    auto_copy: bool,
    price: Decimal,
    paid: AmountBuffer,
    copies: CopyTracker,
    sink: Box<dyn OutputSink>,
}

impl ChangeCalculator {
    /// Creates a calculator with no price set.
    #[must_use]
    pub fn new(config: EngineConfig, sink: Box<dyn OutputSink>) -> Self {
        Self {
            rate: config.rate,
            auto_copy: config.auto_copy,
            price: Decimal::ZERO,
            paid: AmountBuffer::new(),
            copies: CopyTracker::default(),
            sink,
        }
    }

    /// Price in leva.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Paid-amount entry.
    #[must_use]
    pub fn paid(&self) -> &AmountBuffer {
        &self.paid
    }

    /// Sets a new price and starts a fresh payment entry.
    pub fn set_price(&mut self, price_base: Decimal) -> ChangeDisplay {
        self.price = price_base;
        self.paid.clear();
        debug!(price = %price_base, "price set");
        self.recompute()
    }

    /// Appends a digit to the paid amount.
    pub fn on_paid_digit(&mut self, digit: char) -> ChangeDisplay {
        self.paid.push_digit(digit);
        self.recompute()
    }

    /// Appends the decimal separator to the paid amount.
    pub fn on_paid_separator(&mut self) -> ChangeDisplay {
        self.paid.push_separator();
        self.recompute()
    }

    /// Drops the last character of the paid amount.
    pub fn on_paid_backspace(&mut self) -> ChangeDisplay {
        self.paid.backspace();
        self.recompute()
    }

    /// Empties the paid amount.
    pub fn on_paid_clear(&mut self) -> ChangeDisplay {
        self.paid.clear();
        self.recompute()
    }

    /// Dispatches a key press. The toggle key has no meaning here.
    pub fn handle_key(&mut self, key: Key) -> ChangeDisplay {
        match key {
            Key::Digit(d) => self.on_paid_digit(d),
            Key::Separator => self.on_paid_separator(),
            Key::Backspace => self.on_paid_backspace(),
            Key::Escape => self.on_paid_clear(),
            Key::Toggle => self.display(),
        }
    }

    /// Replaces rate and copy policy; price and entry are kept.
    pub fn apply_config(&mut self, config: EngineConfig) -> ChangeDisplay {
        self.rate = config.rate;
        self.auto_copy = config.auto_copy;
        self.recompute()
    }

    /// Read-only projection for rendering.
    #[must_use]
    pub fn display(&self) -> ChangeDisplay {
        let paid = self.paid.value();
        let change = Money::new(calculate_change(self.price, paid, self.rate), Currency::Eur);
        ChangeDisplay {
            paid_display: Money::new(paid, Currency::Bgn).to_string(),
            change_display: change.to_string(),
            change_raw: format_plain(change.amount),
            change,
            status: assess_payment(self.price, paid),
        }
    }

    /// The value eligible for clipboard export.
    #[must_use]
    pub fn copyable_result(&self) -> String {
        self.display().change_raw
    }

    fn recompute(&mut self) -> ChangeDisplay {
        let display = self.display();
        if self.auto_copy {
            self.copies.offer(
                &display.change_raw,
                display.change.is_zero(),
                self.sink.as_mut(),
            );
        }
        display
    }
}

impl fmt::Debug for ChangeCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeCalculator")
            .field("rate", &self.rate)
            .field("auto_copy", &self.auto_copy)
            .field("price", &self.price)
            .field("paid", &self.paid)
            .finish_non_exhaustive()
    }
}
