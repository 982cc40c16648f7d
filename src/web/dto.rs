//! Request and response DTOs for the stile web binding.

use serde::{Deserialize, Serialize};

use crate::db::User;

/// Registration request body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterBody {
    /// Desired username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub password_confirmation: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginBody {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Public view of a user. Never exposes the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at.clone(),
        }
    }
}

/// Successful registration or login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Always true on this path.
    pub success: bool,
    /// Opaque session token; carry it in the Authorization header.
    pub session_token: String,
    /// The authenticated user.
    pub user: UserInfo,
}

/// Logout response.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always true: logout cannot fail.
    pub success: bool,
}

/// Identity lookup response.
///
/// Anonymous is a normal outcome, not an error: `authenticated` is false
/// and `user` absent.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Whether the token resolved to an identity.
    pub authenticated: bool,
    /// The resolved user, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}
