//! Portfolio Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Portfolio-specific result type alias
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Portfolio-specific error variants
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Portfolio missing or owned by someone else. One message for
    /// both, so ids cannot be probed for existence.
    #[error("Portfolio not found")]
    PortfolioNotFound,

    /// Asset catalog entry not found
    #[error("Asset not found")]
    AssetNotFound,

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PortfolioError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortfolioError::PortfolioNotFound | PortfolioError::AssetNotFound => {
                StatusCode::NOT_FOUND
            }
            PortfolioError::Validation(_) => StatusCode::BAD_REQUEST,
            PortfolioError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PortfolioError::PortfolioNotFound | PortfolioError::AssetNotFound => {
                ErrorKind::NotFound
            }
            PortfolioError::Validation(_) => ErrorKind::BadRequest,
            PortfolioError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            PortfolioError::Database(e) => {
                tracing::error!(error = %e, "Portfolio database error");
            }
            _ => {
                tracing::debug!(error = %self, "Portfolio error");
            }
        }
    }
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        self.log();
        AppError::new(self.kind(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_hides_ownership() {
        let err = PortfolioError::PortfolioNotFound;
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Portfolio not found");
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = PortfolioError::Validation("Name is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
