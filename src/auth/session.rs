//! Session management for stile.
//!
//! Sessions are an explicit server-side mapping from an opaque token to a
//! user id. The transport layer (cookie, Authorization header) only carries
//! the token; nothing derived from the user record is cached here.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// A session binding an opaque token to a user id.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique, unguessable session token (UUID v4).
    pub token: String,
    /// User ID bound to this session.
    pub user_id: i64,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn new(user_id: i64, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or_default();

        Self {
            token: Uuid::new_v4().to_string(),
            user_id,
            created_at: now,
            expires_at,
        }
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Session manager tracking active sessions.
///
/// Safe for concurrent use: all operations take `&self` and synchronize on
/// an interior lock, so a single manager is shared across request handlers.
#[derive(Debug)]
pub struct SessionManager {
    /// Active sessions by token.
    sessions: RwLock<HashMap<String, Session>>,
    /// Session lifetime.
    ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Create a session manager with the default lifetime.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_SESSION_TTL_SECS))
    }

    /// Create a session manager with a custom session lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Session>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Create a new session bound to a user id.
    ///
    /// Each call generates a fresh token; an existing token is never reused.
    pub fn create(&self, user_id: i64) -> Session {
        let session = Session::new(user_id, self.ttl);
        self.write()
            .insert(session.token.clone(), session.clone());

        debug!(user_id = user_id, "Session created");
        session
    }

    /// Resolve a token to its bound user id.
    ///
    /// Returns `None` for an absent, unrecognized, invalidated, or expired
    /// token. Garbage input is just "no current identity", never an error.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        {
            let sessions = self.read();
            match sessions.get(token) {
                Some(session) if !session.is_expired() => return Some(session.user_id),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it so later lookups don't pay the check again
        self.write().remove(token);
        None
    }

    /// Invalidate a session by token.
    ///
    /// Idempotent: invalidating an unknown or already-invalidated token is a
    /// no-op. Returns whether a session was actually removed.
    pub fn invalidate(&self, token: &str) -> bool {
        if let Some(session) = self.write().remove(token) {
            info!(user_id = session.user_id, "Session invalidated");
            true
        } else {
            debug!("Invalidate: session not found");
            false
        }
    }

    /// Invalidate all sessions for a user.
    pub fn invalidate_user(&self, user_id: i64) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        let removed = before - sessions.len();

        if removed > 0 {
            info!(user_id = user_id, count = removed, "All user sessions invalidated");
        }
        removed
    }

    /// Remove expired sessions.
    pub fn cleanup(&self) -> usize {
        let mut sessions = self.write();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());

        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired sessions");
        }
        removed
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.read().len()
    }
}
