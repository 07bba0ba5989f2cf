//! Handler for health check endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /healthz`
///
/// # Response
///
/// ```json
/// { "ok": true, "version": "1.0.0" }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}
