//! Mandir - devotional companion backend
//!
//! Hosts Saarathi guidance sessions against a scripture-retrieval service,
//! mala counters, and the small bits of shared UI state a client needs.

mod api;
mod backend;
mod catalog;
mod config;
mod guidance;
mod mala;
mod nav;
mod runtime;

use api::{create_router, AppState};
use backend::{GuidanceBackend, HttpGuidanceBackend, LoggingBackend};
use config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mandir=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env();

    let http = HttpGuidanceBackend::new(&config.api_url, config.backend_timeout)?;
    tracing::info!(
        endpoint = %http.endpoint(),
        timeout_secs = config.backend_timeout.as_secs(),
        "Guidance backend configured"
    );
    let backend: Arc<dyn GuidanceBackend> = Arc::new(LoggingBackend::new(http));

    let state = AppState::new(&config, backend);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Mandir server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
