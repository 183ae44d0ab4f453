//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Username already registered.
    ///
    /// The original API surfaced duplicate registration as a 400, and
    /// clients depend on the exact message.
    #[error("Username already exists")]
    UsernameTaken,

    /// Email already registered
    #[error("Email already exists")]
    EmailTaken,

    /// Wrong username or password. Deliberately generic so the
    /// response cannot be used to enumerate accounts.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Too many failed attempts from this client
    #[error("Too many failed login attempts. Try again after {minutes} minutes.")]
    LockedOut { minutes: u64 },

    /// No valid session on a guarded route
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Valid session but missing the admin flag
    #[error("Admin access required")]
    AdminRequired,

    /// Session token missing, malformed, tampered or expired
    #[error("Not authenticated")]
    SessionInvalid,

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Reset token unknown, consumed or expired
    #[error("Invalid or expired reset token")]
    ResetTokenInvalid,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UsernameTaken | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::LockedOut { .. } => StatusCode::UNAUTHORIZED,
            AuthError::NotAuthenticated | AuthError::SessionInvalid => StatusCode::UNAUTHORIZED,
            AuthError::AdminRequired => StatusCode::FORBIDDEN,
            AuthError::Validation(_) | AuthError::ResetTokenInvalid => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UsernameTaken | AuthError::EmailTaken => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::LockedOut { .. }
            | AuthError::NotAuthenticated
            | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::Validation(_) | AuthError::ResetTokenInvalid => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::LockedOut { minutes } => {
                tracing::warn!(minutes_remaining = minutes, "Login attempt while locked out");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::UsernameTaken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::LockedOut { minutes: 15 }.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::NotAuthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::AdminRequired.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_lockout_message_reveals_remaining_time() {
        let err = AuthError::LockedOut { minutes: 12 };
        assert_eq!(
            err.to_string(),
            "Too many failed login attempts. Try again after 12 minutes."
        );
    }

    #[test]
    fn test_duplicate_username_message() {
        assert_eq!(AuthError::UsernameTaken.to_string(), "Username already exists");
    }
}
