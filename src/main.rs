//! ==============================================================================
//! main.rs - sensor hub entry point
//! ==============================================================================
//!
//! purpose:
//!     the server half of roomsense. sensor nodes POST readings here;
//!     the dashboard binary polls them back out.
//!
//! responsibilities:
//!     - load configuration (config/roomsense.toml, defaults otherwise)
//!     - connect the reading store and bootstrap the schema
//!     - serve the two HTTP routes until shutdown
//!
//! architecture:
//!
//!     sensor node ──POST /sensor-data──▶ ┌──────────────┐
//!                                        │  axum router │──▶ reading store
//!     dashboard ◀──GET /get-sensor-data──└──────────────┘
//!
//!     no component calls back into another; all coordination goes
//!     through the store and the dashboard's fixed-interval polling.
//!
//! ==============================================================================

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use roomsense::config::AppConfig;
use roomsense::server;
use roomsense::store::ReadingStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    tracing::info!("connecting reading store at {}", config.database.url);
    let store = ReadingStore::connect(&config.database.url).await?;

    let app = server::router(store);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("hub listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
