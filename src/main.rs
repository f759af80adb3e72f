//! Diabrisk: Diabetes risk prediction service.
//!
//! Main entry point for the HTTP server binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use diabrisk::adapters::http;
use diabrisk::adapters::model::LogisticModel;
use diabrisk::application::PredictionService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting diabrisk...");

    let model_path = std::env::var("DIABRISK_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models/model.json"));

    // The artifact must load before any request is served; a broken or
    // missing model is fatal at startup.
    let model = LogisticModel::load(&model_path)
        .with_context(|| format!("failed to load model from {}", model_path.display()))?;

    let service = Arc::new(PredictionService::new(Arc::new(model)));
    let app = http::router(service);

    let port: u16 = std::env::var("PORT")
        .ok()
        .map(|v| v.parse())
        .transpose()
        .context("PORT must be a number")?
        .unwrap_or(8000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Diabrisk shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
}
