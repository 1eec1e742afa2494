//! User-related entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account holder.
///
/// The numeric id is assigned by the store and never changes. The password
/// lives on this type only as an argon2 hash; no plaintext credential is
/// ever stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the store.
    pub id: i64,
    /// Login name, unique across all users.
    pub username: String,
    /// Salted password hash in PHC string format.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Role or job title. Optional at the entity level.
    pub position: Option<String>,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Administrative console access.
    pub is_staff: bool,
    /// Full privilege bypass.
    pub is_superuser: bool,
    /// When this account was registered.
    pub date_joined: DateTime<Utc>,
    /// When this account last logged in, if ever.
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Full name as rendered on the home page.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a user. The store assigns the id and the registration
/// timestamp.
///
/// Self-service registration never sets the staff or superuser flags; they
/// default to false on insertion and there is no way to override them here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Salted password hash in PHC string format.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Role or job title.
    pub position: Option<String>,
}

impl NewUser {
    /// Creates a new user record ready for insertion.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            position: None,
        }
    }

    /// Sets the position.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

/// Non-credential fields an existing user may edit about themselves.
///
/// The password hash is deliberately absent: profile updates never touch
/// credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileChanges {
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Role or job title.
    pub position: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new("testuser", "hash", "Test", "User", "testuser@email.com")
            .with_position("Tester");

        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "testuser@email.com");
        assert_eq!(user.position, Some("Tester".to_string()));
    }

    #[test]
    fn test_full_name() {
        let user = User {
            id: 1,
            username: "testuser".to_string(),
            password_hash: "hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "testuser@email.com".to_string(),
            position: Some("Tester".to_string()),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: Utc::now(),
            last_login: None,
        };

        assert_eq!(user.full_name(), "Test User");
    }
}
