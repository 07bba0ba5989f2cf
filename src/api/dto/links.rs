//! DTOs for link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// Both fields are optional at the JSON level so that a missing
/// `original_url` is reported as `invalid_url` rather than a decode error.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL (http or https), at most 2048 characters.
    #[serde(default)]
    #[validate(length(max = 2048, message = "original_url is too long"))]
    pub original_url: Option<String>,

    /// Optional custom short code, 6-8 alphanumeric characters.
    #[serde(default)]
    pub custom_code: Option<String>,
}

/// A created link plus its absolute short URL.
#[derive(Debug, Serialize)]
pub struct CreatedLinkResponse {
    #[serde(flatten)]
    pub link: Link,
    pub short_url: String,
}

/// Acknowledgement body for deletions.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
