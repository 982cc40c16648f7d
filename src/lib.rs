//! stile - credential authentication and session service
//!
//! Registration, login, logout, and session-backed identity lookup for a
//! web application, over a SQLite-backed user store.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, verify_password, AuthOutcome, AuthService, ErrorCode, Field, FieldError,
    LoginError, LoginRequest, PasswordError, RegisterError, RegisterRequest, Session,
    SessionManager,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository, UserStoreError};
pub use error::{Result, StileError};
