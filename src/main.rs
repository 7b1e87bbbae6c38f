//! Bookmark Hub server entry point.
//!
//! Reads configuration from the environment (and `.env`), opens the
//! database and serves the JSON API until Ctrl+C.

use std::sync::Arc;

use bookmark_hub::api;
use bookmark_hub::app::App;
use bookmark_hub::config::Config;
use bookmark_hub::logger;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logger::init(&config.log_level)?;

    for key in config.insecure_defaults() {
        warn!(%key, "using the built-in default, set it before exposing this server");
    }

    let addr = config.bind_addr;
    info!(?config, "starting bookmark hub v{}", env!("CARGO_PKG_VERSION"));
    let app = Arc::new(App::new(config)?);
    info!(admin = %app.auth.admin_username(), "admin account configured");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, api::router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
