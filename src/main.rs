// SPDX-License-Identifier: MIT
// Copyright 2026 F3RVA

//! F3RVA site server
//!
//! Serves the workout archive, consent and crawler endpoints behind the
//! F3RVA website.

use f3rva_site::{config::Config, services::ArchiveApiClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        env = ?config.site_env,
        analytics = config.google_analytics_id.is_some(),
        "Starting F3RVA site"
    );

    let archive = ArchiveApiClient::new(&config.api_base_url, config.api_timeout)?;
    tracing::info!(base_url = %archive.base_url(), "Archive API client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        archive: Arc::new(archive),
    });

    // Build router
    let app = f3rva_site::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("f3rva_site=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .try_init()?;
    Ok(())
}
