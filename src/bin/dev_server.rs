//! Development server for the card game web UI.
//!
//! Serves the built SPA from `dist_dir` and forwards the configured API
//! prefix to the backend. Not used in production.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use card_game_frontend::{config, proxy};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "card_game_frontend=debug,dev_server=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting card game dev server");

    // Load configuration
    let config = config::load_config()?;
    tracing::info!(?config, "Configuration loaded");

    proxy::serve(&config).await
}
