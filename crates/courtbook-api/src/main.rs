//! Courtbook API server entry point.

use std::sync::{Arc, Mutex};

use courtbook_api::config::AppConfig;
use courtbook_api::error::AppError;
use courtbook_api::state::{AppState, SeededRng};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Courtbook API server");

    // Read configuration from environment.
    let config = AppConfig::from_env()?;
    let catalog = config.clock_type_catalog()?;
    tracing::info!(clock_types = catalog.len(), "clock type catalog loaded");

    // Build application state.
    let app_state = AppState::in_memory(catalog, Arc::new(Mutex::new(SeededRng::from_os())));

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = courtbook_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
