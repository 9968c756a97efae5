//! UMKM Directory - console
//!
//! Browse, search and moderate local small businesses from the terminal.
//! All state lives in memory for the duration of the session.

use std::io;

use anyhow::Context;
use shared::ListingStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use umkm_directory_console::{config::LogConfig, Config, Session, SessionSettings};

fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config.log);

    tracing::info!("Starting UMKM Directory console");
    tracing::info!("Environment: {}", config.environment);

    let store = match &config.directory.seed_path {
        Some(path) => {
            tracing::info!("Loading initial listings from {}", path);
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read seed file {}", path))?;
            ListingStore::from_seed_json(&json)?
        }
        None => ListingStore::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        store,
        SessionSettings::from(&config),
        stdin.lock(),
        stdout.lock(),
    );
    session.run()?;

    Ok(())
}

/// Logs go to stderr so they never interleave with the rendered views
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log.filter.as_str().into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            log.json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(io::stderr)),
        )
        .with(
            (!log.json).then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr)),
        )
        .init();
}
