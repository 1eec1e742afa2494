//! SQLite user store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{NewUser, ProfileChanges, User};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::{UserStore, UserStoreError, UserStoreResult};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    position TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    is_staff INTEGER NOT NULL DEFAULT 0,
    is_superuser INTEGER NOT NULL DEFAULT 0,
    date_joined TEXT NOT NULL,
    last_login TEXT
);
";

/// Database row for a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    email: String,
    position: Option<String>,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    date_joined: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            position: row.position,
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            date_joined: row.date_joined,
            last_login: row.last_login,
        }
    }
}

/// SQLite-backed user store.
///
/// Username uniqueness rides on the `UNIQUE` column constraint, so a racing
/// duplicate registration fails inside the database rather than in
/// application logic.
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Connects to the database at `database_url` and applies the schema.
    pub async fn connect(database_url: &str) -> UserStoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.apply_schema().await?;
        tracing::debug!(database_url, "User store connected");
        Ok(store)
    }

    /// Opens a fresh in-memory database. Intended for tests.
    pub async fn in_memory() -> UserStoreResult<Self> {
        // A shared pool against :memory: would give each connection its own
        // database, so the in-memory store is pinned to one connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.apply_schema().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn apply_schema(&self) -> UserStoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

/// Maps a sqlx error to `UsernameTaken` when it is a unique-constraint
/// violation, which for this schema can only be the username column.
fn map_unique_violation(e: sqlx::Error, username: &str) -> UserStoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            UserStoreError::username_taken(username)
        }
        _ => UserStoreError::Database(e),
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create_user(&self, new_user: NewUser) -> UserStoreResult<User> {
        let date_joined = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users
                 (username, password_hash, first_name, last_name, email, position,
                  is_active, is_staff, is_superuser, date_joined, last_login)
             VALUES (?, ?, ?, ?, ?, ?, 1, 0, 0, ?, NULL)",
        )
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.position)
        .bind(date_joined)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &new_user.username))?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            position: new_user.position,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined,
            last_login: None,
        })
    }

    async fn get_user(&self, id: i64) -> UserStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, first_name, last_name, email, position,
                    is_active, is_staff, is_superuser, date_joined, last_login
             FROM users
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> UserStoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, password_hash, first_name, last_name, email, position,
                    is_active, is_staff, is_superuser, date_joined, last_login
             FROM users
             WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> UserStoreResult<User> {
        let result = sqlx::query(
            "UPDATE users
             SET username = ?, first_name = ?, last_name = ?, email = ?, position = ?
             WHERE id = ?",
        )
        .bind(&changes.username)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.position)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &changes.username))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::not_found(id));
        }

        self.get_user(id)
            .await?
            .ok_or(UserStoreError::NotFound { id })
    }

    async fn set_password_hash(&self, id: i64, password_hash: &str) -> UserStoreResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::not_found(id));
        }
        Ok(())
    }

    async fn record_login(&self, id: i64, at: DateTime<Utc>) -> UserStoreResult<()> {
        let result = sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::not_found(id));
        }
        Ok(())
    }

    async fn count_users(&self) -> UserStoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
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
    async fn test_create_and_fetch() {
        let store = SqliteUserStore::in_memory().await.unwrap();

        let created = store.create_user(sample_user()).await.unwrap();
        assert_eq!(created.id, 1);
        assert!(created.is_active);
        assert!(!created.is_staff);

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.username, "testuser");
        assert_eq!(fetched.position, Some("Tester".to_string()));
        assert!(fetched.last_login.is_none());
    }

    #[tokio::test]
    async fn test_unique_username_constraint() {
        let store = SqliteUserStore::in_memory().await.unwrap();

        store.create_user(sample_user()).await.unwrap();
        let err = store.create_user(sample_user()).await.unwrap_err();
        assert!(matches!(err, UserStoreError::UsernameTaken { .. }));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let store = SqliteUserStore::in_memory().await.unwrap();
        let created = store.create_user(sample_user()).await.unwrap();

        let updated = store
            .update_profile(
                created.id,
                ProfileChanges {
                    username: "renamed".to_string(),
                    first_name: "Changed".to_string(),
                    last_name: "Name".to_string(),
                    email: "changed@email.com".to_string(),
                    position: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "renamed");
        assert_eq!(updated.position, None);
        assert_eq!(updated.password_hash, created.password_hash);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let store = SqliteUserStore::in_memory().await.unwrap();
        let err = store
            .update_profile(
                7,
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
        assert!(matches!(err, UserStoreError::NotFound { id: 7 }));
    }

    #[tokio::test]
    async fn test_record_login() {
        let store = SqliteUserStore::in_memory().await.unwrap();
        let created = store.create_user(sample_user()).await.unwrap();

        let at = Utc::now();
        store.record_login(created.id, at).await.unwrap();

        let fetched = store.get_user(created.id).await.unwrap().unwrap();
        let stamped = fetched.last_login.unwrap();
        assert!((stamped - at).num_seconds().abs() < 2);
    }
}
