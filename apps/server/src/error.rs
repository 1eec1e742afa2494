//! Server error types.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use user_store::UserStoreError;

/// Server error type.
///
/// Field-level validation failures are not errors at this level; forms
/// re-render at 200 with their messages. This type covers the rest:
/// missing entities, store failures and authentication plumbing.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User store error.
    #[error("Store error: {0}")]
    Store(#[from] UserStoreError),

    /// Authentication error.
    #[error("Auth error: {0}")]
    Auth(#[from] auth::AuthError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, title) = match &self {
            ServerError::NotFound(msg) => {
                tracing::debug!(error = %msg, "Not found");
                (StatusCode::NOT_FOUND, "Not Found")
            }
            ServerError::Store(UserStoreError::NotFound { id }) => {
                tracing::debug!(id, "User not found");
                (StatusCode::NOT_FOUND, "Not Found")
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
        };

        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>{title}</title></head>\
             <body><h1>{title}</h1></body></html>"
        );

        (status, Html(body)).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
