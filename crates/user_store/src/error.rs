//! User store error types.

use thiserror::Error;

/// Errors that can occur during user store operations.
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// No user with the given id.
    #[error("User not found: {id}")]
    NotFound { id: i64 },

    /// The username is already taken by another account.
    #[error("Username already taken: {username}")]
    UsernameTaken { username: String },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UserStoreError {
    /// Creates a not found error.
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Creates a username taken error.
    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }
}

/// Result type for user store operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;
