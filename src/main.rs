//! morning-brief - Main binary
//!
//! Serves one JSON document on `GET /` that merges three independent
//! providers: index closes and headlines, the city's air quality index, and
//! current weather. Provider failures are reported inside the document, so
//! the endpoint answers 200 whenever the process is reachable.
//!
//! Configuration comes from flags or the environment; see [`config::Args`].

mod config;

use anyhow::Context;
use clap::Parser;
use providers::Aggregator;
use server::{ServerState, create_app};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The environment may already hold everything; a missing .env is fine.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from(Args::parse());
    init_tracing(config.debug);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }
    info!(providers = ?config.providers, debug = config.debug, "configuration loaded");

    let aggregator =
        Aggregator::new(config.providers.clone()).context("failed to build provider clients")?;
    let app = create_app(ServerState::new(aggregator));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(debug: bool) {
    let default_directive = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, keep serving until the process is killed.
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
