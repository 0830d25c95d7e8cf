//! Router configuration for the scan service.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Create the main router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        // Health check for container orchestration
        .route("/health", get(handlers::health))
        // Upload page and the scan endpoint
        .route("/", get(handlers::index))
        .route("/scan", post(handlers::scan_document))
        // Stored originals
        .route("/uploads/{*path}", get(handlers::serve_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
