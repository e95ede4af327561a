//! Router assembly for the algoviz HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax. CORS is permissive since the
/// replay client is served from a different origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::health))
        // Catalog
        .route("/algorithms", get(handlers::catalog::list_algorithms))
        .route("/algorithms/{algorithm}", get(handlers::catalog::get_algorithm))
        // Traces
        .route(
            "/algorithms/{algorithm}/trace",
            post(handlers::trace::generate_trace),
        )
        .route("/api/{route}", post(handlers::trace::legacy_trace))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
