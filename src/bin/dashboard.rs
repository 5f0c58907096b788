//! terminal dashboard: polls the hub on a fixed interval and redraws
//! the panel, alert list and rolling charts after every fetch.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use roomsense::config::AppConfig;
use roomsense::dashboard::{poller::Poller, DashboardState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    tracing::info!(
        "polling {} every {}s",
        config.poller.base_url,
        config.poller.interval_seconds
    );

    let state = Arc::new(Mutex::new(DashboardState::default()));
    let poller = Poller::new(&config.poller.base_url);
    let handle = poller.start(
        state,
        Duration::from_secs(config.poller.interval_seconds),
        |state| {
            // clear-and-redraw; plain prints keep the frame readable
            print!("\x1B[2J\x1B[H");
            println!("{}", state.render());
        },
    );

    tokio::signal::ctrl_c().await?;
    handle.stop().await;
    Ok(())
}
