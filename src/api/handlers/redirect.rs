//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the visit.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject reserved segments and malformed codes (no store access)
/// 2. Look up the link
/// 3. Atomically increment `clicks` and set `last_clicked`
/// 4. Return 302 Found
///
/// The visit is counted before the response is sent, so a client that does
/// not follow the redirect still counts.
///
/// # Errors
///
/// Returns 404 Not Found if the code is reserved, malformed, undecodable or unknown.
pub async fn redirect_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Path(code) = code.map_err(|e| {
        AppError::not_found("Short link not found", json!({ "reason": e.body_text() }))
    })?;
    let link = state.link_service.visit(&code).await?;

    let location = location_header(&link.original_url).ok_or_else(|| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code }),
        )
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Uses the stored URL verbatim when it is header-safe, otherwise its
/// percent-encoded (and punycoded) serialization.
fn location_header(original_url: &str) -> Option<HeaderValue> {
    HeaderValue::try_from(original_url).ok().or_else(|| {
        Url::parse(original_url)
            .ok()
            .and_then(|url| HeaderValue::try_from(url.as_str()).ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_url_kept_verbatim() {
        let value = location_header("https://example.com").unwrap();
        assert_eq!(value, "https://example.com");
    }

    #[test]
    fn test_non_ascii_url_is_encoded() {
        let value = location_header("https://example.com/straße?q=ü").unwrap();
        assert_eq!(value, "https://example.com/stra%C3%9Fe?q=%C3%BC");
    }
}
