//! Snapshot server entry point.
//!
//! Loads configuration, initialises structured logging, wires the quote
//! rotator and weather client into the aggregator, and serves HTTP until
//! Ctrl+C.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use snapshot_server::config::AppConfig;
use snapshot_server::quotes::QuoteRotator;
use snapshot_server::server;
use snapshot_server::snapshot::SnapshotAggregator;
use snapshot_server::weather::nws::NwsClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = AppConfig::load_or_default()?;

    info!(
        location = %cfg.location.name,
        lat = cfg.location.lat,
        lon = cfg.location.lon,
        upstream = %cfg.weather.base_url,
        timeout_secs = cfg.weather.timeout_secs,
        max_retries = cfg.weather.max_retries,
        "Snapshot server starting up"
    );

    let weather = NwsClient::new(&cfg.weather)?;
    let aggregator = SnapshotAggregator::new(
        QuoteRotator::builtin(),
        Arc::new(weather),
        cfg.location.coordinate(),
        cfg.theme(),
    );

    let router = server::build_router(Arc::new(aggregator), &cfg.server.static_dir);
    server::serve(router, &cfg.bind_addr()).await
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("snapshot_server=info,tower_http=info"));

    let json_logging = std::env::var("SNAPSHOT_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
