//! Web API binding for stile.
//!
//! Exposes registration, login, logout, and identity lookup over HTTP.
//! The transport only carries the opaque session token.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::{ApiError, ApiErrorCode};
pub use handlers::AppState;
pub use router::create_router;
pub use server::serve;
