//! User repository for stile.
//!
//! Persistence boundary for user records. Storage failures are caught and
//! translated here; in particular a unique-constraint violation on the
//! username column surfaces as [`UserStoreError::UsernameTaken`] so callers
//! see the same conflict whether they lost a race or hit an ordinary
//! duplicate.

use sqlx::SqlitePool;
use thiserror::Error;

use super::user::{NewUser, User};

/// Errors from the user store.
#[derive(Error, Debug)]
pub enum UserStoreError {
    /// The username is already taken (unique index violation).
    #[error("username already exists")]
    UsernameTaken,

    /// Any other storage failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for UserStoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return UserStoreError::UsernameTaken;
            }
        }
        UserStoreError::Database(e.to_string())
    }
}

/// Repository for user records.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, UserStoreError> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(&new_user.username)
            .bind(&new_user.password)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| UserStoreError::Database("created user not found".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, UserStoreError> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users
             WHERE username = ? COLLATE NOCASE",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(result)
    }

    /// Check if a username is already taken (case-insensitive).
    pub async fn username_exists(&self, username: &str) -> Result<bool, UserStoreError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = ? COLLATE NOCASE)")
                .bind(username)
                .fetch_one(self.pool)
                .await?;
        Ok(exists.0)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64, UserStoreError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}
