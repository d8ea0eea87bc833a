//! Route definitions for the LinkShare HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart boundaries and the small form fields next to `file`.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.storage.max_upload_size_bytes as usize + MULTIPART_OVERHEAD_BYTES;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    // File bodies are streamed as stored; only JSON routes are compressed.
    let json_routes = Router::new()
        .merge(link_routes())
        .merge(organization_routes())
        .merge(admin_routes())
        .merge(health_routes())
        .layer(CompressionLayer::new());

    let api_routes = Router::new().merge(share_routes()).merge(json_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Public share access
fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/share/{link_id}", get(handlers::share::link_metadata))
        .route("/share/{link_id}/download", get(handlers::share::download))
        .route("/share/{link_id}/preview", get(handlers::share::preview))
}

/// Upload and the owner's links
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(handlers::upload::upload))
        .route("/links", get(handlers::links::list_links))
        .route(
            "/links/{link_id}",
            axum::routing::delete(handlers::links::delete_link),
        )
}

/// The caller's organization
fn organization_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organization",
            get(handlers::organization::get_organization)
                .post(handlers::organization::organization_action)
                .delete(handlers::organization::leave_organization),
        )
        .route(
            "/organization/members",
            get(handlers::organization::list_members),
        )
        .route("/organization/files", get(handlers::organization::list_files))
}

/// Platform administration
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/stats", get(handlers::admin::stats))
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
