//! Engine sink wired to the host's clipboard and settings store.

use std::cell::RefCell;
use std::rc::Rc;

use bgneur_core::{ConversionDirection, OutputSink};
use tracing::{info, warn};

use crate::settings_store::JsonSettingsStore;

/// Clipboard contents shared between the engine sink and the front end.
///
/// Holds only the latest value, like a system clipboard.
#[derive(Debug, Clone, Default)]
pub struct SharedClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl SharedClipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the clipboard contents.
    pub fn set_text(&self, text: &str) {
        *self.contents.borrow_mut() = Some(text.to_string());
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

/// [`OutputSink`] that copies into a [`SharedClipboard`] and persists the
/// direction through a [`JsonSettingsStore`].
#[derive(Debug, Clone)]
pub struct HostSink {
    clipboard: SharedClipboard,
    store: Option<JsonSettingsStore>,
}

impl HostSink {
    /// Creates a sink. Without a store, direction changes are only logged.
    #[must_use]
    pub const fn new(clipboard: SharedClipboard, store: Option<JsonSettingsStore>) -> Self {
        Self { clipboard, store }
    }
}

impl OutputSink for HostSink {
    fn copy_result(&mut self, text: &str) {
        self.clipboard.set_text(text);
    }

    fn direction_changed(&mut self, direction: ConversionDirection) {
        let Some(store) = &self.store else {
            return;
        };
        match store.set_last_direction(direction) {
            Ok(()) => info!(?direction, "direction remembered"),
            Err(err) => warn!(error = %err, "failed to persist direction"),
        }
    }
}
