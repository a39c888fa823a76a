//! HTTP server — Axum router for the snapshot API and static assets.
//!
//! CORS is open for GET so a page served from elsewhere can poll the API.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{error, info};

use routes::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/snapshot", get(routes::get_snapshot))
        .route("/ping", get(routes::ping))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(router: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(addr, "Snapshot server listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Snapshot server error")?;

    info!("Snapshot server shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received.");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
