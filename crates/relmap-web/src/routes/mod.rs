//! HTTP and WebSocket routes for the web server.

mod api;
mod ws;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower_http::{cors::CorsLayer, services::ServeDir};

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let static_dir = std::env::var("RELMAP_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            manifest.join("static")
        });

    Router::new()
        // API routes
        .route("/api/stats", get(api::get_stats))
        .route("/api/researchers", get(api::get_researchers))
        .route("/api/researchers/:id/connections", get(api::get_connections))
        .route("/api/facets", get(api::get_facets))
        .route("/api/view", post(api::view))
        .route("/api/reload", post(api::reload))
        // WebSocket for live views
        .route("/ws/view", get(ws::view_handler))
        // Static files (serve index.html as fallback)
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        // CORS for development
        .layer(CorsLayer::permissive())
        // State
        .with_state(state)
}
