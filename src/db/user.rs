//! User model for stile.

/// User entity representing a registered account.
///
/// Records are created once at registration and are immutable afterwards;
/// there is no update or delete path in this service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store.
    pub id: i64,
    /// Login username (unique, case-insensitive).
    pub username: String,
    /// Password hash (Argon2 PHC string), never the plaintext.
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
///
/// The `password` field must already be hashed; the repository never sees
/// a plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash.
    pub password: String,
}

impl NewUser {
    /// Create a new user record from a username and a pre-hashed password.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password_hash.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = NewUser::new("alice1", "$argon2id$...");
        assert_eq!(user.username, "alice1");
        assert_eq!(user.password, "$argon2id$...");
    }
}
