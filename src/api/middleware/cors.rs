//! Cross-origin policy for the browser UI.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Creates the CORS layer.
///
/// With `allow_origin = None` any origin may call the API. Otherwise only
/// that origin is allowed. An origin that is not a valid header value falls
/// back to allowing any origin, with a warning.
pub fn layer(allow_origin: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    match allow_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Invalid CORS_ALLOW_ORIGIN, allowing any origin");
            base.allow_origin(Any)
        }
        None => base.allow_origin(Any),
    }
}
