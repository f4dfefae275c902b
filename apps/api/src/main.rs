mod analytics;
mod config;
mod errors;
mod extract;
mod models;
mod mood_client;
mod reminders;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analytics::MoodTrendAnalyzer;
use crate::config::Config;
use crate::mood_client::MoodClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting moodtrend v{}", env!("CARGO_PKG_VERSION"));

    let mood_client = MoodClient::new(&config.mood_api_url, config.mood_api_timeout)
        .context("Failed to build mood backend client")?;
    info!("Mood backend: {}", mood_client.history_url());

    let analyzer = MoodTrendAnalyzer::new(config.moving_average_window);
    info!("Moving average window: {} entries", config.moving_average_window);

    let state = AppState {
        mood_source: Arc::new(mood_client),
        analyzer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
