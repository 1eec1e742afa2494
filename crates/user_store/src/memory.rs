//! In-memory user store implementation for testing and development.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{NewUser, ProfileChanges, User};
use tokio::sync::RwLock;

use crate::{UserStore, UserStoreError, UserStoreResult};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, User>,
    next_id: i64,
}

/// In-memory user store.
///
/// All rows live behind one `RwLock`, so the uniqueness check and the
/// insert happen under a single write guard and concurrent duplicate
/// registrations cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    /// Creates a new in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> UserStoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.username == new_user.username) {
            return Err(UserStoreError::username_taken(new_user.username));
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            username: new_user.username,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            position: new_user.position,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: Utc::now(),
            last_login: None,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: i64) -> UserStoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> UserStoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> UserStoreResult<User> {
        let mut inner = self.inner.write().await;
        if inner
            .users
            .values()
            .any(|u| u.id != id && u.username == changes.username)
        {
            return Err(UserStoreError::username_taken(changes.username));
        }

        let user = inner
            .users
            .get_mut(&id)
            .ok_or(UserStoreError::NotFound { id })?;
        user.username = changes.username;
        user.first_name = changes.first_name;
        user.last_name = changes.last_name;
        user.email = changes.email;
        user.position = changes.position;
        Ok(user.clone())
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> UserStoreResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(UserStoreError::NotFound { id })?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> UserStoreResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&id)
            .ok_or(UserStoreError::NotFound { id })?;
        user.last_login = Some(at);
        Ok(())
    }

    async fn count_users(&self) -> UserStoreResult<u64> {
        let inner = self.inner.read().await;
        Ok(inner.users.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> NewUser {
        NewUser::new("testuser", "hash", "Test", "User", "testuser@email.com")
            .with_position("Tester")
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let store = MemoryUserStore::new();

        let created = store.create_user(sample_user()).await.unwrap();
        assert_eq!(created.username, "testuser");
        assert!(created.is_active);
        assert!(!created.is_staff);
        assert!(!created.is_superuser);
        assert!(created.last_login.is_none());

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "testuser@email.com");

        let by_name = store.get_user_by_username("testuser").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
    }

    #[tokio::test]
    async fn test_ids_are_monotonic() {
        let store = MemoryUserStore::new();

        let first = store.create_user(sample_user()).await.unwrap();
        let mut second = sample_user();
        second.username = "otheruser".to_string();
        let second = store.create_user(second).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryUserStore::new();

        store.create_user(sample_user()).await.unwrap();
        let err = store.create_user(sample_user()).await.unwrap_err();
        assert!(matches!(err, UserStoreError::UsernameTaken { .. }));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_profile_leaves_credentials_alone() {
        let store = MemoryUserStore::new();
        let created = store.create_user(sample_user()).await.unwrap();

        let updated = store
            .update_profile(
                created.id,
                ProfileChanges {
                    username: "testuser".to_string(),
                    first_name: "Changed".to_string(),
                    last_name: "Name".to_string(),
                    email: "changed@email.com".to_string(),
                    position: Some("Lead Tester".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Changed");
        assert_eq!(updated.password_hash, created.password_hash);
        assert_eq!(updated.date_joined, created.date_joined);
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let store = MemoryUserStore::new();
        let err = store
            .update_profile(
                42,
                ProfileChanges {
                    username: "ghost".to_string(),
                    first_name: "No".to_string(),
                    last_name: "One".to_string(),
                    email: "ghost@email.com".to_string(),
                    position: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserStoreError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn test_update_profile_username_collision() {
        let store = MemoryUserStore::new();
        store.create_user(sample_user()).await.unwrap();
        let mut other = sample_user();
        other.username = "otheruser".to_string();
        let other = store.create_user(other).await.unwrap();

        let err = store
            .update_profile(
                other.id,
                ProfileChanges {
                    username: "testuser".to_string(),
                    first_name: "Other".to_string(),
                    last_name: "User".to_string(),
                    email: "otheruser@email.com".to_string(),
                    position: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserStoreError::UsernameTaken { .. }));
    }

    #[tokio::test]
    async fn test_record_login_and_password_change() {
        let store = MemoryUserStore::new();
        let created = store.create_user(sample_user()).await.unwrap();

        let now = Utc::now();
        store.record_login(created.id, now).await.unwrap();
        store.set_password_hash(created.id, "newhash").await.unwrap();

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.last_login, Some(now));
        assert_eq!(fetched.password_hash, "newhash");
    }
}
