//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::DUPLICATE_EMAIL_MESSAGE;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested user does not exist
    #[error("User not found with ID: {0}")]
    NotFound(i64),

    /// Business-rule violation on create: email already registered
    #[error("{0}")]
    DuplicateEmail(String),

    /// Gateway failure
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    /// Any other unexpected failure (malformed input, server fault)
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // A normal miss: 404 with an empty body
            AppError::NotFound(id) => {
                tracing::debug!("User not found with ID: {}", id);
                StatusCode::NOT_FOUND.into_response()
            }
            // Validation failures carry their message to the client
            AppError::DuplicateEmail(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            // Internal causes are logged but never leaked to the client
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn duplicate_email() -> Self {
        AppError::DuplicateEmail(DUPLICATE_EMAIL_MESSAGE.to_string())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
