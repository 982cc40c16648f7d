//! Authentication module for stile.
//!
//! Password hashing, credential validation, session management, and the
//! authentication service that ties them together.

mod password;
mod service;
mod session;
pub mod validation;

pub use password::{hash_password, verify_password, PasswordError};
pub use service::{
    AuthOutcome, AuthService, LoginError, LoginRequest, RegisterError, RegisterRequest,
};
pub use session::{Session, SessionManager, DEFAULT_SESSION_TTL_SECS};
pub use validation::{ErrorCode, Field, FieldError};
