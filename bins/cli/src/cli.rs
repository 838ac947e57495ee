//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// BGN ⇄ EUR converter and change calculator.
#[derive(Debug, Parser)]
#[command(name = "bgneur", version, about)]
pub struct Cli {
    /// Exchange rate override (BGN per EUR). `,` is accepted as separator.
    #[arg(long, global = true)]
    pub rate: Option<String>,

    /// Copy each new result to the clipboard (echoed to stdout).
    #[arg(long, global = true)]
    pub auto_copy: bool,

    /// Ignore and never write the settings file.
    #[arg(long, global = true)]
    pub no_settings: bool,

    /// Settings file location.
    #[arg(long, global = true, env = "BGNEUR_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert one amount.
    Convert {
        /// Amount to convert.
        amount: String,
        /// Currency to convert into.
        #[arg(long, value_enum, default_value_t = Target::Eur)]
        to: Target,
    },
    /// Compute change in euro for a leva price and payment.
    Change {
        /// Price in leva.
        #[arg(long)]
        price: String,
        /// Amount paid in leva.
        #[arg(long)]
        paid: String,
    },
    /// Replay a key script, e.g. `"100<sp>10<bs>"`, and print the final state.
    Keys {
        /// Keys: digits, `.`/`,`, `<bs>`, `<esc>`, `<sp>`.
        script: String,
        /// Page receiving the keys.
        #[arg(long, value_enum, default_value_t = PageArg::Converter)]
        page: PageArg,
        /// Price in leva for the change page.
        #[arg(long)]
        price: Option<String>,
    },
    /// Line-oriented session: each line is a key script or a `:` command.
    Interactive,
    /// Check for a newer release.
    CheckUpdate,
    /// Inspect or reset the settings file.
    Settings {
        /// Action.
        #[command(subcommand)]
        action: SettingsAction,
    },
}

/// Settings subcommands.
#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the effective settings as JSON.
    Show,
    /// Print the settings file location.
    Path,
    /// Restore defaults.
    Reset,
}

/// Conversion target currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Euro.
    Eur,
    /// Leva.
    Bgn,
}

/// Page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageArg {
    /// BGN ⇄ EUR converter.
    Converter,
    /// Change calculator.
    Change,
}
