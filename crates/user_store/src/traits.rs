//! User store trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{NewUser, ProfileChanges, User};

use crate::UserStoreResult;

/// Trait for user storage operations.
///
/// Implementations must enforce username uniqueness atomically: of two
/// concurrent `create_user` calls with the same username, exactly one
/// succeeds and the other gets [`UsernameTaken`](crate::UserStoreError).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a new user and returns the stored record with its assigned id.
    ///
    /// The new account is active, with the staff and superuser flags false
    /// and the registration timestamp set on insertion.
    async fn create_user(&self, new_user: NewUser) -> UserStoreResult<User>;

    /// Gets a user by id.
    async fn get_user(&self, id: i64) -> UserStoreResult<Option<User>>;

    /// Gets a user by username.
    async fn get_user_by_username(&self, username: &str) -> UserStoreResult<Option<User>>;

    /// Replaces the non-credential profile fields of an existing user.
    ///
    /// The password hash, status flags and timestamps are untouched.
    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> UserStoreResult<User>;

    /// Replaces the stored password hash of an existing user.
    async fn set_password_hash(&self, id: i64, password_hash: &str) -> UserStoreResult<()>;

    /// Stamps the last-login time of an existing user.
    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> UserStoreResult<()>;

    /// Returns the total number of users.
    async fn count_users(&self) -> UserStoreResult<u64>;
}
