//! Application error type shared by services, repositories and HTTP handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::infrastructure::cache::CacheError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the shortener core.
///
/// "No record" is never an error on the read path: lookups return `Ok(None)`.
/// [`AppError::NotFound`] is only produced at the HTTP edge.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Unique constraint violation in the durable store.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Store or cache unreachable, or a call exceeded its timeout.
    #[error("{message}")]
    Unavailable { message: String, details: Value },

    /// Cached payload could not be decoded into a URL record.
    #[error("{message}")]
    Decode { message: String, details: Value },

    /// The slug generator ran out of attempts before finding a free identifier.
    #[error("{message}")]
    SlugExhausted { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
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

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn decode(message: impl Into<String>, details: Value) -> Self {
        Self::Decode {
            message: message.into(),
            details,
        }
    }

    pub fn slug_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::SlugExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            AppError::Decode { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "decode_error"),
            AppError::SlugExhausted { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "slug_exhausted"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.parts();
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Unavailable { message, details }
            | AppError::Decode { message, details }
            | AppError::SlugExhausted { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.parts();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::Decode(reason) => {
                AppError::decode("Cached URL record is corrupt", json!({ "reason": reason }))
            }
            other => AppError::unavailable("Cache error", json!({ "reason": other.to_string() })),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(e.field_errors()))
    }
}

/// Maps SQLx errors onto the application taxonomy.
///
/// Unique violations become [`AppError::Conflict`]; connectivity problems
/// become [`AppError::Unavailable`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            AppError::unavailable("Database unavailable", json!({ "reason": e.to_string() }))
        }
        _ => AppError::internal("Database error", json!({ "reason": e.to_string() })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_decode_maps_to_decode() {
        let err: AppError = CacheError::Decode("expected value".to_string()).into();
        assert!(matches!(err, AppError::Decode { .. }));
    }

    #[test]
    fn test_cache_timeout_maps_to_unavailable() {
        let err: AppError = CacheError::Timeout("GET".to_string()).into();
        assert!(matches!(err, AppError::Unavailable { .. }));
    }

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Unavailable { .. }));
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_error_info_codes() {
        let info = AppError::slug_exhausted("no slug", json!({})).to_error_info();
        assert_eq!(info.code, "slug_exhausted");
        assert_eq!(info.message, "no slug");

        let info = AppError::unavailable("down", json!({ "a": 1 })).to_error_info();
        assert_eq!(info.code, "unavailable");
        assert_eq!(info.details["a"], 1);
    }

    #[test]
    fn test_status_codes() {
        let resp = AppError::not_found("x", json!({})).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = AppError::unavailable("x", json!({})).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
