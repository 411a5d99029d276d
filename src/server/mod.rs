mod handlers;
mod state;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::location::Geocoder;

pub use handlers::{ApiError, LocationCheckRequest, LocationCheckResponse};
pub use state::AppState;

/// Listener and request-handling settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub courtesy_delay: Duration,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/building", post(handlers::get_building))
        .route("/api/check-location", post(handlers::check_location))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

pub async fn start(config: ServerConfig, geocoder: Arc<dyn Geocoder>) -> anyhow::Result<()> {
    let app = build_router(AppState {
        geocoder,
        courtesy_delay: config.courtesy_delay,
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind to {}", addr))?;

    info!("Geofence API listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
