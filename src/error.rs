use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The primary error type for the application.
///
/// Consolidates every failure a handler can produce and maps each variant
/// onto a structured JSON error response.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unexpected internal failures; details are logged, not exposed.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
    /// Malformed or semantically invalid requests.
    #[error("Bad request: {0}")]
    BadRequest(String),
    /// A requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
    /// The request conflicts with existing state (e.g. duplicate username).
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Database failures that are not a plain row miss.
    #[error("Database error: {0}")]
    Database(String),
    /// Missing or invalid credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Authenticated but not allowed to touch the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),
    /// A specific request field failed validation.
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },
    /// The service cannot respond right now (pool exhausted etc.).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Filesystem failures while handling uploads.
    #[error("I/O error: {0}")]
    Io(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, error_message, details) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!("Internal error {}: {:?}", error_id, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    Some(json!({ "error_id": error_id.to_string() })),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, None),
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    Some(json!({ "details": msg })),
                )
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Validation failed for field '{}'", field),
                Some(json!({ "field": field, "message": message })),
            ),
            AppError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE", msg, None)
            }
            AppError::Io(msg) => {
                tracing::error!("I/O error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "An I/O error occurred".to_string(),
                    Some(json!({ "details": msg })),
                )
            }
        };

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": error_message,
            },
            "status": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        if let Some(details) = details {
            body["error"]["details"] = details;
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                // UNIQUE violations are client conflicts, not server faults
                if msg.to_lowercase().contains("unique constraint failed") {
                    AppError::Conflict(msg)
                } else {
                    AppError::Database(format!("Database error: {}", msg))
                }
            }
            sqlx::Error::PoolTimedOut => {
                AppError::ServiceUnavailable("Database connection pool timed out".to_string())
            }
            _ => AppError::Database(format!("Database error: {}", err)),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(format!("{}: {}", err.kind(), err))
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// An extension trait for `Option` that provides a convenient way to convert
/// an `Option` to a `Result` with a `NotFound` error.
pub trait OptionExt<T> {
    /// Converts `None` into `AppError::NotFound("<entity> not found")`.
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(format!("{} not found", entity)))
    }
}

/// Request field validation helpers shared by the route handlers.
pub mod validation {
    use super::*;

    pub fn validate_str_len(value: &str, field: &str, min: usize, max: usize) -> AppResult<()> {
        let len = value.chars().count();
        if len < min || len > max {
            return Err(AppError::Validation {
                field: field.to_string(),
                message: format!("Length must be between {} and {} characters, got {}", min, max, len),
            });
        }
        Ok(())
    }

    pub fn validate_range(value: i64, field: &str, min: i64, max: i64) -> AppResult<()> {
        if value < min || value > max {
            return Err(AppError::Validation {
                field: field.to_string(),
                message: format!("Value must be between {} and {}, got {}", min, max, value),
            });
        }
        Ok(())
    }

    pub fn validate_positive_id(value: i64, field: &str) -> AppResult<()> {
        if value <= 0 {
            return Err(AppError::Validation {
                field: field.to_string(),
                message: format!("Value must be positive, got {}", value),
            });
        }
        Ok(())
    }
}
