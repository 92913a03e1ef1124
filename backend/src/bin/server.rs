//! Flight Dash HTTP Server Binary
//!
//! This is the main entry point for the dashboard REST API server.
//! It loads configuration, wires the live source, its synthetic fallback and the
//! dataset cache, then starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! AVIATIONSTACK_ACCESS_KEY=... cargo run --bin flight-dash-server
//!
//! # Explicit config file
//! FLIGHT_DASH_CONFIG=./flight-dash.toml cargo run --bin flight-dash-server
//! ```
//!
//! # Environment Variables
//!
//! - `FLIGHT_DASH_CONFIG`: Path to a TOML config file
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5001)
//! - `AVIATIONSTACK_BASE_URL`, `AVIATIONSTACK_ACCESS_KEY`: Live feed endpoint and key
//! - `SOURCE_TIMEOUT_SECS`: Live feed timeout (default: 10)
//! - `CACHE_MAX_AGE_SECS`: Refetch after this many seconds (default: never)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use flight_dash::cache::DatasetCache;
use flight_dash::config::AppConfig;
use flight_dash::http::{create_router, AppState};
use flight_dash::models::{Clock, SystemClock};
use flight_dash::source::{AviationStackSource, FallbackSource, SyntheticGenerator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Flight Dash HTTP Server");

    let config = AppConfig::load()?;
    if config.source.access_key.is_empty() {
        info!("No AviationStack access key configured; expect synthetic data");
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let live = AviationStackSource::new(&config.source)?;
    let source = FallbackSource::new(Arc::new(live), SyntheticGenerator::new(clock.clone()));
    let cache = Arc::new(DatasetCache::new(
        source,
        clock.clone(),
        config.cache.refresh_policy(),
    ));
    info!("Dataset cache ready ({:?})", cache.policy());

    let app = create_router(AppState::new(cache, clock));

    let addr: SocketAddr = config.bind_address().parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
