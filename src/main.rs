mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::mock::MockNumberSource;
use adapters::store::MemoryWindowStore;
use adapters::upstream::HttpNumberSource;
use application::AverageService;
use config::Config;
use interface::http::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("numavg={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting numavg v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Initialize adapters
    let store = Arc::new(MemoryWindowStore::new(config.window_size));
    let upstream = Arc::new(HttpNumberSource::new(
        config.source_urls.clone(),
        config.fetch_timeout,
    )?);
    let mock = MockNumberSource::new(config.mock_delay_max);

    let average_service = Arc::new(AverageService::new(
        store,
        upstream,
        mock,
        config.fetch_timeout,
        config.fetch_policy,
    ));

    info!(
        "✓ Average service initialized (window size {}, fetch policy {:?})",
        config.window_size, config.fetch_policy
    );

    // Create HTTP server
    let app = create_router(average_service);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("✓ numavg listening on {}", addr);
    info!("  → API: http://localhost:{}/numbers/{{number_id}}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
