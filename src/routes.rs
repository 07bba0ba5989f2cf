//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /healthz`  - Liveness probe
//! - `/api/links*`    - Link management (see [`crate::api::routes`])
//! - `GET  /{code}`   - Short link redirect with visit counting
//!
//! Reserved first segments (`api`, `healthz`, `code`) never resolve as codes.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Browser access from the UI origin
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// Integration tests drive this directly.
pub fn router(state: AppState, cors_allow_origin: Option<&str>) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(cors::layer(cors_allow_origin))
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] with trailing slashes trimmed.
pub fn app_router(state: AppState, cors_allow_origin: Option<&str>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, cors_allow_origin))
}
