//! Error types for the Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::envelope::MessageResponse;

/// Main application error type.
///
/// Every operation converts its failures into one of these; none of them
/// propagates past the handler boundary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad caller input (missing name, readPage > pageCount)
    #[error("{0}")]
    Validation(String),

    /// No record with the given id
    #[error("{0}")]
    NotFound(String),

    /// Store invariant violated after a successful mutation. Unreachable
    /// under correct operation; signals an implementation bug, not a
    /// caller error.
    #[error("store consistency violated: {0}")]
    Consistency(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Consistency(msg) => {
                tracing::error!("Consistency error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(MessageResponse::fail(message))).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
