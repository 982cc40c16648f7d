//! Request handlers for the stile web binding.

use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use crate::auth::{AuthService, LoginError, LoginRequest, RegisterError, RegisterRequest};
use crate::web::dto::{
    AuthResponse, LoginBody, LogoutResponse, MeResponse, RegisterBody, UserInfo,
};
use crate::web::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The authentication service.
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

/// Extract the bearer token from the Authorization header, if any.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// POST /api/auth/register - register a new user.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    let request = RegisterRequest {
        username: body.username,
        password: body.password,
        password_confirmation: body.password_confirmation,
    };

    let outcome = state.auth.register(&request).await.map_err(|e| match e {
        RegisterError::Invalid(_) | RegisterError::PasswordMismatch => {
            ApiError::validation(e.field_errors())
        }
        RegisterError::UsernameTaken => {
            ApiError::conflict("A user with that username already exists")
                .with_fields(e.field_errors())
        }
        RegisterError::Password(_) | RegisterError::Storage(_) => {
            tracing::error!("Registration failed: {}", e);
            ApiError::internal("An internal error occurred")
        }
    })?;

    Ok(Json(AuthResponse {
        success: true,
        session_token: outcome.session.token,
        user: UserInfo::from(&outcome.user),
    }))
}

/// POST /api/auth/login - log a user in.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthResponse>, ApiError> {
    let request = LoginRequest {
        username: body.username,
        password: body.password,
    };

    let outcome = state.auth.login(&request).await.map_err(|e| match e {
        LoginError::Invalid(_) => ApiError::validation(e.field_errors()),
        LoginError::InvalidCredentials => {
            ApiError::unauthorized("Credentials invalid").with_fields(e.field_errors())
        }
        LoginError::Storage(_) => {
            tracing::error!("Login failed: {}", e);
            ApiError::internal("An internal error occurred")
        }
    })?;

    Ok(Json(AuthResponse {
        success: true,
        session_token: outcome.session.token,
        user: UserInfo::from(&outcome.user),
    }))
}

/// POST /api/auth/logout - invalidate the caller's session.
///
/// Always succeeds, with or without a (valid) token.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<LogoutResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.auth.logout(token);
    }
    Json(LogoutResponse { success: true })
}

/// GET /api/auth/me - resolve the caller's identity.
///
/// A missing or stale token yields an anonymous response, not an error.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Json<MeResponse> {
    let user = match bearer_token(&headers) {
        Some(token) => state.auth.current_user(token).await,
        None => None,
    };

    Json(MeResponse {
        authenticated: user.is_some(),
        user: user.as_ref().map(UserInfo::from),
    })
}
