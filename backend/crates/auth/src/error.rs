//! Auth Error Types
//!
//! Domain outcomes of the auth use cases carry a stable [`ErrorCode`] that
//! clients can match on. Infrastructure faults (database, signing, worker
//! pool) carry no code: they are logged and rendered as a generic
//! `kernel::error::AppError`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::Display;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Stable, client-facing error codes
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    #[display("VALIDATION_ERROR")]
    ValidationError,
    #[display("EMAIL_EXISTS")]
    EmailExists,
    #[display("INVALID_CREDENTIALS")]
    InvalidCredentials,
    #[display("NOT_FOUND")]
    NotFound,
    #[display("EXPIRED")]
    Expired,
    /// Fallback for an outcome without an explicit code. Seeing it means a
    /// bug somewhere, or a code this build does not know about.
    #[default]
    #[display("UNKNOWN")]
    #[serde(other)]
    Unknown,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation; one entry per violated rule
    #[error("Validation failed: {}", .0.join(";"))]
    Validation(Vec<String>),

    #[error("Email is already registered")]
    EmailExists,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Refresh token unknown, or already consumed
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    /// Missing or invalid access token on a protected route
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Engine error code; `None` for infrastructure faults
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            AuthError::Validation(_) => Some(ErrorCode::ValidationError),
            AuthError::EmailExists => Some(ErrorCode::EmailExists),
            AuthError::InvalidCredentials => Some(ErrorCode::InvalidCredentials),
            AuthError::RefreshTokenNotFound => Some(ErrorCode::NotFound),
            AuthError::RefreshTokenExpired => Some(ErrorCode::Expired),
            AuthError::Unauthenticated | AuthError::Database(_) | AuthError::Internal(_) => None,
        }
    }

    /// Default ErrorKind when no endpoint-specific mapping applies
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::RefreshTokenExpired => ErrorKind::BadRequest,
            AuthError::EmailExists => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::RefreshTokenNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Render with a caller-chosen status for coded errors.
    ///
    /// Endpoints disagree on status codes for the same engine code (sign-up
    /// answers 400 for everything, sign-in 401), so the boundary picks.
    /// Errors without a code keep their default rendering.
    pub fn respond_with(self, status: impl FnOnce(ErrorCode) -> StatusCode) -> Response {
        let Some(code) = self.code() else {
            return self.into_response();
        };
        self.log();

        let details = match &self {
            AuthError::Validation(rules) => Some(rules.join(";")),
            _ => None,
        };

        (status(code), Json(ErrorBody { error: code, details })).into_response()
    }

    /// Convert to AppError without leaking internal detail
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            AuthError::Internal(msg) => {
                AppError::internal("Internal server error").with_source(InternalFault(msg))
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::RefreshTokenExpired => {
                tracing::warn!("Expired refresh token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Error body for coded failures: `{"error": "<CODE>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
#[error("{0}")]
struct InternalFault(String);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if self.code().is_some() {
            let status = StatusCode::from_u16(self.kind().status_code())
                .unwrap_or(StatusCode::BAD_REQUEST);
            return self.respond_with(|_| status);
        }
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AuthError::Internal(format!("Token signing failed: {err}"))
    }
}
