//! Interactive session over both pages.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use bgneur_core::{
    ChangeCalculator, ChangeDisplay, ConversionDirection, ConversionResult, Converter,
    EngineConfig, Key, OutputSink, PaymentStatus, RateControl,
};
use bgneur_host::{HostSink, JsonSettingsStore, SharedClipboard};
use bgneur_shared::AppResult;
use tracing::warn;

use crate::commands::parse_cli_amount;

/// The page receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// BGN ⇄ EUR converter.
    Converter,
    /// Change calculator.
    Change,
}

impl Page {
    const fn next(self) -> Self {
        match self {
            Self::Converter => Self::Change,
            Self::Change => Self::Converter,
        }
    }
}

/// What the caller should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text.
    Render(String),
    /// End the session.
    Quit,
}

const HELP: &str = "\
keys: 0-9 . , <bs> <esc> <sp>(switch direction)
:page [converter|change]  switch page
:price <amount>           set price (leva) and open the change page
:rate <value>             set exchange rate (when unlocked)
:lock                     lock/unlock the exchange rate
:help                     this text
:q                        quit";

/// Copies made since the last render.
type CopyLog = Rc<RefCell<Vec<String>>>;

/// Host sink that also logs copies for the terminal echo.
struct EchoSink {
    host: HostSink,
    copied: CopyLog,
}

impl OutputSink for EchoSink {
    fn copy_result(&mut self, text: &str) {
        self.host.copy_result(text);
        self.copied.borrow_mut().push(text.to_string());
    }

    fn direction_changed(&mut self, direction: ConversionDirection) {
        self.host.direction_changed(direction);
    }
}

/// Both pages plus the rate field, wired to the host sink.
pub struct Session {
    converter: Converter,
    change: ChangeCalculator,
    page: Page,
    rate: RateControl,
    config: EngineConfig,
    copied: CopyLog,
    store: Option<JsonSettingsStore>,
}

impl Session {
    /// Creates a session on the converter page.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        clipboard: &SharedClipboard,
        store: Option<JsonSettingsStore>,
    ) -> Self {
        let copied = CopyLog::default();
        let sink = || EchoSink {
            host: HostSink::new(clipboard.clone(), store.clone()),
            copied: Rc::clone(&copied),
        };
        Self {
            converter: Converter::new(config, Box::new(sink())),
            change: ChangeCalculator::new(config, Box::new(sink())),
            page: Page::Converter,
            rate: RateControl::new(config.rate, config.rate_locked),
            config,
            copied,
            store,
        }
    }

    /// Current page.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Switches to `page`.
    pub fn set_page(&mut self, page: Page) {
        self.page = page;
    }

    /// Converter engine.
    #[cfg(test)]
    #[must_use]
    pub const fn converter(&self) -> &Converter {
        &self.converter
    }

    /// Change engine.
    #[cfg(test)]
    #[must_use]
    pub const fn change(&self) -> &ChangeCalculator {
        &self.change
    }

    /// Sets the change page price and opens that page.
    ///
    /// A price that is not a non-negative number is rejected and the current
    /// one kept.
    pub fn set_price(&mut self, text: &str) -> AppResult<()> {
        let price = parse_cli_amount(text)?;
        self.change.set_price(price);
        self.page = Page::Change;
        Ok(())
    }

    /// Feeds a key script to the current page.
    pub fn type_keys(&mut self, script: &str) {
        for key in Key::parse_script(script) {
            match self.page {
                Page::Converter => {
                    self.converter.handle_key(key);
                }
                Page::Change => {
                    self.change.handle_key(key);
                }
            }
        }
    }

    /// Handles one input line.
    pub fn execute(&mut self, line: &str) -> Outcome {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.strip_prefix(':') else {
            self.type_keys(line);
            return Outcome::Render(self.render());
        };
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        let note = match (name, arg) {
            ("q" | "quit", _) => return Outcome::Quit,
            ("help", _) => return Outcome::Render(HELP.to_string()),
            ("page", None) => {
                self.page = self.page.next();
                None
            }
            ("page", Some("converter")) => {
                self.page = Page::Converter;
                None
            }
            ("page", Some("change")) => {
                self.page = Page::Change;
                None
            }
            ("price", Some(amount)) => self.set_price(amount).err().map(|err| err.to_string()),
            ("rate", Some(text)) => Some(self.set_rate(text)),
            ("lock", None) => Some(self.toggle_lock()),
            _ => Some(format!("unknown command ':{command}' (try :help)")),
        };
        let mut out = self.render();
        if let Some(note) = note {
            out.insert_str(0, &format!("{note}\n"));
        }
        Outcome::Render(out)
    }

    fn set_rate(&mut self, text: &str) -> String {
        match self.rate.set_from_text(text) {
            Ok(rate) => {
                self.config.rate = rate;
                self.converter.apply_config(self.config);
                self.change.apply_config(self.config);
                self.persist(|settings| settings.exchange_rate = Some(rate.value()));
                format!("rate set to {rate}")
            }
            Err(err) => format!("{err}; keeping {}", self.rate.rate()),
        }
    }

    fn toggle_lock(&mut self) -> String {
        let locked = self.rate.toggle_lock();
        self.config.rate_locked = locked;
        self.persist(|settings| settings.rate_locked = locked);
        if locked {
            "rate locked".to_string()
        } else {
            "rate unlocked".to_string()
        }
    }

    fn persist(&self, update: impl FnOnce(&mut bgneur_shared::UserSettings)) {
        let Some(store) = &self.store else {
            return;
        };
        let mut settings = store.load();
        update(&mut settings);
        if let Err(err) = store.save(&settings) {
            warn!(error = %err, "failed to save settings");
        }
    }

    /// Renders the current page plus anything copied since the last render.
    pub fn render(&self) -> String {
        let mut out = match self.page {
            Page::Converter => render_conversion(&self.converter.display()),
            Page::Change => render_change(self.change.price(), &self.change.display()),
        };
        for copied in self.copied.borrow_mut().drain(..) {
            let _ = write!(out, "\ncopied: {copied}");
        }
        out
    }
}

/// One-line converter rendering.
#[must_use]
pub fn render_conversion(result: &ConversionResult) -> String {
    format!("{}  ⇄  {}", result.input_display, result.output_display)
}

/// One-line change page rendering.
#[must_use]
pub fn render_change(price: rust_decimal::Decimal, display: &ChangeDisplay) -> String {
    let status = match display.status {
        PaymentStatus::Pending => "waiting",
        PaymentStatus::Insufficient => "insufficient",
        PaymentStatus::Exact => "exact",
        PaymentStatus::ChangeDue => "change due",
    };
    let price = bgneur_shared::Money::new(price, bgneur_shared::Currency::Bgn);
    format!(
        "price {price} | paid {} | change {} ({status})",
        display.paid_display, display.change_display
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn session() -> Session {
        Session::new(EngineConfig::default(), &SharedClipboard::new(), None)
    }

    #[test]
    fn test_keys_render_conversion() {
        let mut session = session();
        assert_eq!(
            session.execute("100"),
            Outcome::Render("100.00 лв.  ⇄  €51.13".to_string())
        );
        assert_eq!(
            session.execute("<sp>10"),
            Outcome::Render("€10.00  ⇄  19.56 лв.".to_string())
        );
    }

    #[test]
    fn test_price_opens_change_page() {
        let mut session = session();
        session.execute(":price 10");
        assert_eq!(session.page(), Page::Change);
        assert_eq!(
            session.execute("15"),
            Outcome::Render(
                "price 10.00 лв. | paid 15.00 лв. | change €2.56 (change due)".to_string()
            )
        );
    }

    #[rstest]
    #[case(":price abc")]
    #[case(":price -5")]
    fn test_bad_price_is_rejected(#[case] line: &str) {
        let mut session = session();
        session.execute(":price 10");
        session.execute(":page converter");
        let Outcome::Render(out) = session.execute(line) else {
            panic!("expected render");
        };
        assert!(out.starts_with("Validation error"), "{out}");
        assert_eq!(session.page(), Page::Converter);
        assert_eq!(session.change().price(), dec!(10));
        assert!(session.set_price("abc").is_err());
    }

    #[test]
    fn test_unlocked_config_allows_rate_edits() {
        let config = EngineConfig {
            rate_locked: false,
            ..EngineConfig::default()
        };
        let mut session = Session::new(config, &SharedClipboard::new(), None);
        let Outcome::Render(out) = session.execute(":rate 2") else {
            panic!("expected render");
        };
        assert!(out.starts_with("rate set to 2"), "{out}");
        assert_eq!(session.converter().config().rate.value(), dec!(2));
    }

    #[test]
    fn test_page_cycles() {
        let mut session = session();
        session.execute(":page");
        assert_eq!(session.page(), Page::Change);
        session.execute(":page");
        assert_eq!(session.page(), Page::Converter);
        session.execute(":page change");
        assert_eq!(session.page(), Page::Change);
    }

    #[test]
    fn test_locked_rate_is_kept() {
        let mut session = session();
        let Outcome::Render(out) = session.execute(":rate 2") else {
            panic!("expected render");
        };
        assert!(out.starts_with("Exchange rate is locked"));
        assert_eq!(session.converter().config().rate.value(), dec!(1.95583));
    }

    #[test]
    fn test_unlocked_rate_applies_to_both_pages() {
        let mut session = session();
        session.execute(":lock");
        session.execute(":rate 2,0");
        session.execute("10");
        assert_eq!(session.converter().copyable_result(), "5.00");
        session.execute(":price 4");
        session.execute("10");
        assert_eq!(session.change().copyable_result(), "3.00");
    }

    #[test]
    fn test_auto_copy_is_echoed_once() {
        let config = EngineConfig {
            auto_copy: true,
            ..EngineConfig::default()
        };
        let clipboard = SharedClipboard::new();
        let mut session = Session::new(config, &clipboard, None);
        let Outcome::Render(out) = session.execute("100") else {
            panic!("expected render");
        };
        assert!(out.ends_with("copied: 0.51\ncopied: 5.11\ncopied: 51.13"));
        assert_eq!(clipboard.text().as_deref(), Some("51.13"));
        let Outcome::Render(out) = session.execute("") else {
            panic!("expected render");
        };
        assert!(!out.contains("copied"));
    }

    #[test]
    fn test_rate_and_lock_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("settings.json"));
        let mut session = Session::new(
            EngineConfig::default(),
            &SharedClipboard::new(),
            Some(store.clone()),
        );
        session.execute(":lock");
        session.execute(":rate 1.96");

        let settings = store.load();
        assert!(!settings.rate_locked);
        assert_eq!(settings.exchange_rate, Some(dec!(1.96)));
    }

    #[test]
    fn test_quit_and_unknown() {
        let mut session = session();
        assert_eq!(session.execute(":q"), Outcome::Quit);
        let Outcome::Render(out) = session.execute(":bogus") else {
            panic!("expected render");
        };
        assert!(out.starts_with("unknown command ':bogus'"));
    }
}
