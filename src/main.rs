//! # PostBoy Main Entry Point

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

use postboy::cmd_args::CommandLineArgs;
use postboy::config::{self, ConfigPaths};
use postboy::{AppController, TerminalEventStream, TerminalRenderStream};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd_args = CommandLineArgs::parse();

    let paths = ConfigPaths::new(config::resolve_config_dir(cmd_args.config_dir()));
    fs::create_dir_all(paths.root())
        .with_context(|| format!("Failed to create {}", paths.root().display()))?;
    init_tracing_subscriber(&paths, cmd_args.log_level())?;

    let mut app = AppController::with_io_streams(
        &cmd_args,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await
}

/// Log to a file under the config dir; the terminal belongs to the UI
fn init_tracing_subscriber(paths: &ConfigPaths, level: Option<&str>) -> Result<()> {
    let level = level
        .map(str::to_string)
        .or_else(|| std::env::var(config::LOG_LEVEL_ENV_VAR).ok())
        .unwrap_or_else(|| config::DEFAULT_LOG_LEVEL.to_string());

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .with_context(|| format!("Failed to open {}", paths.log_file().display()))?;

    let filter = EnvFilter::try_new(&level)
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_LEVEL))
        .add_directive("hyper=warn".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("tokio=warn".parse()?)
        .add_directive("tokio_rustls=warn".parse()?)
        .add_directive("rustls=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    tracing::info!("postboy {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
