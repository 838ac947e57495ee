//! BGN/EUR converter terminal front end.
//!
//! Drives the conversion engine from command-line arguments or from an
//! interactive, line-oriented key session.

mod cli;
mod commands;
mod session;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bgneur_core::EngineConfig;
use bgneur_host::{
    InstanceGuard, JsonSettingsStore, LockFileGuard, SharedClipboard, UpdateChecker, UpdateStatus,
};
use bgneur_shared::{AppConfig, AppError, UserSettings};

use cli::{Cli, Command, PageArg, SettingsAction};
use session::{Outcome, Page, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bgneur=info,bgneur_host=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load().map_err(AppError::from)?;

    let store = if cli.no_settings {
        None
    } else {
        let path = match cli.settings.clone().or_else(|| config.paths.settings_file.clone()) {
            Some(path) => path,
            None => JsonSettingsStore::default_path()?,
        };
        Some(JsonSettingsStore::new(path))
    };
    let stored = store.as_ref().and_then(JsonSettingsStore::load_existing);
    let settings = stored.clone().unwrap_or_default();

    let mut engine =
        EngineConfig::resolve(&config.engine, stored.as_ref()).map_err(AppError::from)?;
    engine.rate = commands::resolve_rate(cli.rate.as_deref(), engine.rate)?;
    if cli.auto_copy {
        engine.auto_copy = true;
    }

    match cli.command {
        Command::Convert { amount, to } => {
            println!("{}", commands::convert_command(&amount, to, &engine)?);
        }
        Command::Change { price, paid } => {
            println!("{}", commands::change_command(&price, &paid, &engine)?);
        }
        Command::Keys {
            script,
            page,
            price,
        } => {
            let mut session = Session::new(engine, &SharedClipboard::new(), store);
            if let Some(price) = price {
                session.set_price(&price)?;
            }
            session.set_page(match page {
                PageArg::Converter => Page::Converter,
                PageArg::Change => Page::Change,
            });
            session.type_keys(&script);
            println!("{}", session.render());
        }
        Command::Interactive => {
            run_interactive(&config, engine, &settings, store).await?;
        }
        Command::CheckUpdate => {
            println!("{}", commands::check_update_command(&config.updates).await?);
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => println!("{}", commands::show_settings(&settings)?),
            SettingsAction::Path => match &store {
                Some(store) => println!("{}", store.path().display()),
                None => println!("settings disabled"),
            },
            SettingsAction::Reset => match &store {
                Some(store) => println!("{}", commands::reset_settings(store)?),
                None => println!("settings disabled"),
            },
        },
    }

    Ok(())
}

async fn run_interactive(
    config: &AppConfig,
    engine: EngineConfig,
    settings: &UserSettings,
    store: Option<JsonSettingsStore>,
) -> anyhow::Result<()> {
    let mut guard = match &config.paths.lock_file {
        Some(path) => LockFileGuard::new(path),
        None => LockFileGuard::in_temp_dir(),
    };
    if !guard.try_acquire() {
        warn!(path = %guard.path().display(), "another instance is running");
        return Ok(());
    }

    if config.updates.enabled && settings.auto_check_updates {
        announce_update(config).await;
    }

    let mut session = Session::new(engine, &SharedClipboard::new(), store);
    println!("{}", session.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.execute(&line) {
            Outcome::Render(text) => println!("{text}"),
            Outcome::Quit => break,
        }
    }

    guard.release();
    info!("session ended");
    Ok(())
}

async fn announce_update(config: &AppConfig) {
    let status = match UpdateChecker::new(&config.updates, env!("CARGO_PKG_VERSION")) {
        Ok(checker) => checker.check().await,
        Err(err) => Err(err),
    };
    match status {
        Ok(UpdateStatus::Available(info)) => {
            println!("new version {} available: {}", info.version, info.page_url);
        }
        Ok(UpdateStatus::UpToDate { .. }) => {}
        Err(err) => warn!(error = %err, "update check failed"),
    }
}
