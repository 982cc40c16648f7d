//! Router configuration for the stile web binding.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{login, logout, me, register, AppState};

/// Create the main API router.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me));

    let api_routes = Router::new().nest("/auth", auth_routes);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
