//! Authentication service for stile.
//!
//! Orchestrates registration, login, logout, and session-backed identity
//! lookup over the user store, the password hasher, and the session manager.

use std::time::Duration;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::auth::session::{Session, SessionManager};
use crate::auth::validation::{validate_credentials, FieldError};
use crate::db::{NewUser, User, UserRepository, UserStoreError};

/// Registration input. Transient: never persisted.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// Desired username (4-15 characters).
    pub username: String,
    /// Password (5-20 characters).
    pub password: String,
    /// Password confirmation; must equal `password`.
    pub password_confirmation: String,
}

/// Login input. Transient: never persisted.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Successful registration or login: the user and their new session.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// The authenticated user record.
    pub user: User,
    /// The session bound to the user.
    pub session: Session,
}

/// Registration failures.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// Structural validation failed; all violations are listed.
    #[error("validation failed")]
    Invalid(Vec<FieldError>),

    /// Username already exists.
    #[error("username already exists")]
    UsernameTaken,

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RegisterError {
    /// Per-field errors for the rendering boundary.
    ///
    /// Infrastructure failures carry no field errors.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            RegisterError::Invalid(errors) => errors.clone(),
            RegisterError::UsernameTaken => vec![FieldError::username_taken()],
            RegisterError::PasswordMismatch => vec![FieldError::password_mismatch()],
            RegisterError::Password(_) | RegisterError::Storage(_) => Vec::new(),
        }
    }
}

/// Login failures.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Structural validation failed; all violations are listed.
    #[error("validation failed")]
    Invalid(Vec<FieldError>),

    /// Unknown username or wrong password. The two cases are deliberately
    /// indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl LoginError {
    /// Per-field errors for the rendering boundary.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            LoginError::Invalid(errors) => errors.clone(),
            LoginError::InvalidCredentials => vec![FieldError::invalid_credentials()],
            LoginError::Storage(_) => Vec::new(),
        }
    }
}

/// Authentication service: registration, login, logout, identity lookup.
///
/// Shared across concurrent requests; all methods take `&self`.
pub struct AuthService {
    pool: SqlitePool,
    sessions: SessionManager,
}

impl AuthService {
    /// Create a service with the default session lifetime.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            sessions: SessionManager::new(),
        }
    }

    /// Create a service with a custom session lifetime.
    pub fn with_session_ttl(pool: SqlitePool, ttl: Duration) -> Self {
        Self {
            pool,
            sessions: SessionManager::with_ttl(ttl),
        }
    }

    fn repo(&self) -> UserRepository<'_> {
        UserRepository::new(&self.pool)
    }

    /// Access the session manager (for maintenance sweeps).
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Register a new user.
    ///
    /// Checks run in a fixed order: structural validation (all violations
    /// reported together), then username uniqueness, then password
    /// confirmation. On failure nothing is created. On success the password
    /// is hashed, the record stored, and a session bound to the new id.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthOutcome, RegisterError> {
        // 1. Structural validation
        let errors = validate_credentials(&request.username, &request.password);
        if !errors.is_empty() {
            return Err(RegisterError::Invalid(errors));
        }

        // 2. Uniqueness pre-check. Not atomic with the insert below; the
        // storage unique index converts a lost race into the same failure.
        let repo = self.repo();
        let exists = repo
            .username_exists(&request.username)
            .await
            .map_err(|e| RegisterError::Storage(e.to_string()))?;
        if exists {
            return Err(RegisterError::UsernameTaken);
        }

        // 3. Confirmation check
        if request.password != request.password_confirmation {
            return Err(RegisterError::PasswordMismatch);
        }

        // 4. Hash and create
        let password_hash = hash_password(&request.password)?;
        let user = match repo.create(&NewUser::new(&request.username, &password_hash)).await {
            Ok(user) => user,
            Err(UserStoreError::UsernameTaken) => return Err(RegisterError::UsernameTaken),
            Err(e) => return Err(RegisterError::Storage(e.to_string())),
        };

        let session = self.sessions.create(user.id);

        info!(
            username = %user.username,
            user_id = user.id,
            "New user registered"
        );

        Ok(AuthOutcome { user, session })
    }

    /// Log a user in.
    ///
    /// An unknown username and a wrong password produce the identical
    /// [`LoginError::InvalidCredentials`] so callers cannot probe which
    /// usernames exist.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthOutcome, LoginError> {
        let errors = validate_credentials(&request.username, &request.password);
        if !errors.is_empty() {
            return Err(LoginError::Invalid(errors));
        }

        let user = self
            .repo()
            .get_by_username(&request.username)
            .await
            .map_err(|e| LoginError::Storage(e.to_string()))?;

        let user = match user {
            Some(user) if verify_password(&request.password, &user.password) => user,
            _ => {
                warn!(username = %request.username, "Login failed");
                return Err(LoginError::InvalidCredentials);
            }
        };

        let session = self.sessions.create(user.id);

        info!(
            username = %user.username,
            user_id = user.id,
            "Login successful"
        );

        Ok(AuthOutcome { user, session })
    }

    /// Log out the session for a token.
    ///
    /// Always succeeds; an unknown or already-invalidated token is a no-op.
    pub fn logout(&self, token: &str) {
        self.sessions.invalidate(token);
    }

    /// Resolve a session token to its user record.
    ///
    /// Returns `None` (anonymous) for an absent, stale, or garbage token,
    /// and for a session whose user no longer exists. The full record is
    /// re-read from the store on every call; identity is never cached.
    pub async fn current_user(&self, token: &str) -> Option<User> {
        let user_id = self.sessions.resolve(token)?;

        match self.repo().get_by_id(user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(user_id = user_id, error = %e, "Identity lookup failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("sessions", &self.sessions.session_count())
            .finish()
    }
}
