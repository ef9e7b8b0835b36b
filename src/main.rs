// mortydex - Rick and Morty character browser
//
// Pages through the character API with status and species filters, keeps a
// deduplicated accumulator, and shows it sorted in a terminal UI with
// infinite scroll. `mortydex list` walks the same feed headlessly.
//
// Architecture:
// - Query (reqwest): GraphQL page fetches, or a built-in demo dataset
// - Feed: filter sessions, pagination cursor, stale-response guard
// - TUI (ratatui): list, filter bar, sentinel row that loads more
// - Event system: fetch tasks report back over an mpsc channel

mod cli;
mod config;
mod events;
mod feed;
mod i18n;
mod logging;
mod model;
mod query;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands run and exit before anything else starts
    if cli::handle_config_command(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    cli.apply_overrides(&mut config);
    let headless = cli.is_headless(&config);

    let log_buffer = LogBuffer::new();

    // Initialize tracing with conditional output
    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: logs go to stderr so stdout stays clean for results
    // File logging: optionally write rotating JSON logs as well
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("mortydex={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must stay alive for the duration of the program so logs flush
    let (file_writer, _file_guard) = match file_log_writer(&config.logging) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with((!headless).then(|| TuiLogLayer::new(log_buffer.clone())))
        .with(headless.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
        }))
        .init();

    let service = query::create_service(&config)?;
    tracing::info!(
        "Using {} backend ({}), language {}",
        service.name(),
        if config.demo_mode { "demo" } else { config.api_url.as_str() },
        config.locale.code()
    );

    if headless {
        let args = match cli.command {
            Some(Commands::List(args)) => args,
            _ => Default::default(),
        };
        cli::run_list(args, &config, service).await
    } else {
        tui::run_tui(&config, service, log_buffer).await
    }
}

/// Rolling file writer for the JSON log, if enabled and the directory is usable
fn file_log_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    Some(tracing_appender::non_blocking(appender))
}
