//! Outbound side effects of the engine.

use tracing::debug;

use crate::currency::ConversionDirection;

/// Receiver of the engine's fire-and-forget notifications.
///
/// Implementations must not block; failures are theirs to log.
#[cfg_attr(test, mockall::automock)]
pub trait OutputSink {
    /// Places a copy-ready result on the clipboard.
    fn copy_result(&mut self, text: &str);

    /// Reports that the user switched conversion direction.
    fn direction_changed(&mut self, direction: ConversionDirection);
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl OutputSink for NoopSink {
    fn copy_result(&mut self, _text: &str) {}

    fn direction_changed(&mut self, _direction: ConversionDirection) {}
}

/// At-most-once-per-value clipboard discipline.
///
/// A result is pushed only when it is non-zero and differs from the last
/// one pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyTracker {
    last_copied: Option<String>,
}

impl CopyTracker {
    /// Offers a result; returns true if it was pushed to `sink`.
    pub fn offer(&mut self, text: &str, is_zero: bool, sink: &mut dyn OutputSink) -> bool {
        if is_zero || self.last_copied.as_deref() == Some(text) {
            return false;
        }
        debug!(result = text, "copying result");
        sink.copy_result(text);
        self.last_copied = Some(text.to_string());
        true
    }

    /// The last value pushed, if any.
    #[must_use]
    pub fn last_copied(&self) -> Option<&str> {
        self.last_copied.as_deref()
    }
}
