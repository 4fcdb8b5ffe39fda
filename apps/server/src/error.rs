//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Opsdesk                                │
//! │                                                                         │
//! │  Handler returns Result<T, ApiError>                                   │
//! │         │                                                               │
//! │         ├── JSON body rejected ──────► 400/415/422 VALIDATION_ERROR    │
//! │         ├── path segment rejected ───► 400 VALIDATION_ERROR            │
//! │         ├── ValidationError ─────────► 422 VALIDATION_ERROR            │
//! │         ├── CoreError::UnsafeId ─────► 400 VALIDATION_ERROR            │
//! │         ├── DbError::UniqueViolation ► 409 DUPLICATE_KEY               │
//! │         ├── other DbError ───────────► 500 DATABASE_ERROR (logged)     │
//! │         └── QR write failure ────────► 500 INTERNAL (logged)           │
//! │                                                                         │
//! │  Body: { "code": "DUPLICATE_KEY", "message": "..." }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and filesystem details are logged, never returned to callers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use opsdesk_core::{CoreError, ValidationError};
use opsdesk_db::DbError;

use crate::config::ConfigError;
use crate::services::notifier::NotifyError;
use crate::services::qr::QrError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "DUPLICATE_KEY",
///   "message": "inventory.id 'X1' already exists"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request body or path failed shape checks
    ValidationError,

    /// Record id already taken (409)
    DuplicateKey,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::new(status, ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal, message)
    }

    fn database(message: impl Into<String>) -> Self {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::DatabaseError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } => ApiError::new(
                StatusCode::CONFLICT,
                ErrorCode::DuplicateKey,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::database("Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                ApiError::database("Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::database("Database operation failed")
            }
            DbError::PoolExhausted => ApiError::database("Database pool exhausted"),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::database("Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            e @ CoreError::UnsafeIdentifier { .. } => {
                ApiError::validation(StatusCode::BAD_REQUEST, e.to_string())
            }
        }
    }
}

/// Body rejections keep the extractor's status (400 bad JSON, 415 wrong
/// content type, 422 missing or mistyped field).
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.status(), rejection.body_text())
    }
}

/// Path rejections (e.g. a segment that is not valid UTF-8) keep the
/// extractor's status.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.status(), rejection.body_text())
    }
}

impl From<QrError> for ApiError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::Invalid(e) => e.into(),
            other => {
                tracing::error!("QR generation failed: {}", other);
                ApiError::internal("Failed to generate QR code")
            }
        }
    }
}

// =============================================================================
// Startup Errors
// =============================================================================

/// Failures while assembling the server before it starts listening.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database: {0}")]
    Database(#[from] DbError),

    #[error("Mail relay: {0}")]
    Notifier(#[from] NotifyError),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}
