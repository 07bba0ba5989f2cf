//! Handlers for link management endpoints (create, list, fetch, delete).

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, CreatedLinkResponse, OkResponse};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::{resolve_base_url, short_url};

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "custom_code": "promo24"
/// }
/// ```
///
/// `custom_code` is optional; an empty string is treated as absent.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "original_url": "https://example.com/some/long/path",
///   "short_code": "promo24",
///   "clicks": 0,
///   "last_clicked": null,
///   "created_at": "2025-01-01T12:00:00Z",
///   "short_url": "https://sho.rt/promo24"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url` / `invalid_code` / `invalid_body` / `validation_error`
/// - 409 `code_exists`
/// - 500 `db_error`
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedLinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let original_url = payload.original_url.unwrap_or_default();
    let link = state
        .link_service
        .create_link(&original_url, payload.custom_code.as_deref())
        .await?;

    let base = resolve_base_url(state.base_url.as_deref(), &headers);
    let short_url = short_url(&base, &link.short_code);

    Ok((
        StatusCode::CREATED,
        Json(CreatedLinkResponse { link, short_url }),
    ))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Link>>, AppError> {
    let links = state.link_service.list_links().await?;
    Ok(Json(links))
}

/// Returns a single link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// - 400 `invalid_code` if the code is malformed or not valid percent-encoded UTF-8
/// - 404 `not_found`
pub async fn get_link_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<Link>, AppError> {
    let Path(code) = code.map_err(|e| AppError::undecodable_code(&e))?;
    let link = state.link_service.get_link(&code).await?;
    Ok(Json(link))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Response
///
/// `200 OK` with `{"ok": true}`.
///
/// # Errors
///
/// - 400 `invalid_code` if the code is malformed
/// - 404 `not_found` if no link has the code (including a repeated delete)
pub async fn delete_link_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<OkResponse>, AppError> {
    let Path(code) = code.map_err(|e| AppError::undecodable_code(&e))?;
    state.link_service.delete_link(&code).await?;
    Ok(Json(OkResponse::ok()))
}
