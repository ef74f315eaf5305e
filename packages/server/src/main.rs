//! Schemagen HTTP server.
//!
//! Exposes the converter as a small JSON API: POST /v1/generate,
//! GET /v1/schemas, GET /health.

mod app;
mod config;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{build_app, build_generator, AppState};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,schemagen_server=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!(port = config.port, "Starting schemagen server");

    let generator = Arc::new(build_generator(&config));
    let state = AppState::new(generator);
    let router = build_app(state, &config.allowed_origins);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Listening");

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}
