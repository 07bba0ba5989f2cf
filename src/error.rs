//! Application error type and its HTTP mapping.
//!
//! Every failure surfaced by a handler is one of four kinds:
//!
//! | Kind         | Status | Machine codes                                          |
//! |--------------|--------|--------------------------------------------------------|
//! | `Validation` | 400    | `invalid_url`, `invalid_code`, `invalid_body`, `validation_error` |
//! | `Conflict`   | 409    | `code_exists`                                          |
//! | `NotFound`   | 404    | `not_found`                                            |
//! | `Internal`   | 500    | `db_error`                                             |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum::extract::rejection::PathRejection;
use serde::Serialize;
use serde_json::{Value, json};

/// JSON envelope for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload: stable machine code, human message and free-form details.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        code: &'static str,
        message: String,
        details: Value,
    },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal {
        code: &'static str,
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            code: "validation_error",
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
            details,
        }
    }

    /// `original_url` is missing, unparsable or not http(s).
    pub fn invalid_url(url: &str) -> Self {
        Self::Validation {
            code: "invalid_url",
            message: "Invalid or missing original_url".to_string(),
            details: json!({ "original_url": url }),
        }
    }

    /// A short code does not match `^[A-Za-z0-9]{6,8}$` or is reserved.
    pub fn invalid_code(code: &str) -> Self {
        Self::Validation {
            code: "invalid_code",
            message: "Short code must be 6-8 alphanumeric characters".to_string(),
            details: json!({ "code": code }),
        }
    }

    /// A `{code}` path segment that could not be decoded.
    pub fn undecodable_code(rejection: &PathRejection) -> Self {
        Self::Validation {
            code: "invalid_code",
            message: "Short code must be 6-8 alphanumeric characters".to_string(),
            details: json!({ "reason": rejection.body_text() }),
        }
    }

    /// The short code is already taken.
    pub fn code_exists(code: &str) -> Self {
        Self::conflict("Short code already exists", json!({ "code": code }))
    }

    /// No link exists for the short code.
    pub fn link_not_found(code: &str) -> Self {
        Self::not_found("Short link not found", json!({ "code": code }))
    }

    /// Any store failure that is not a uniqueness violation.
    pub fn store(reason: impl std::fmt::Display) -> Self {
        Self::Internal {
            code: "db_error",
            message: "Database error".to_string(),
            details: json!({ "reason": reason.to_string() }),
        }
    }

    /// Status code this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation {
                code,
                message,
                details,
            } => (*code, message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("code_exists", message, details),
            AppError::Internal {
                code,
                message,
                details,
            } => (*code, message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, details = ?self.to_error_info().details, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            json!({ "fields": errors.to_string() }),
        )
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::Validation {
            code: "invalid_body",
            message: "Request body must be a JSON object".to_string(),
            details: json!({ "reason": rejection.body_text() }),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps a driver error onto the taxonomy.
///
/// A unique violation on `short_code` becomes [`AppError::Conflict`]; this is
/// how an allocation race lost between pre-check and insert surfaces.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Short code already exists",
            json!({ "constraint": db.constraint() }),
        );
    }

    AppError::store(e)
}
