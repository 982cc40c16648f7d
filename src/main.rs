use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use stile::web::{create_router, serve, AppState};
use stile::{AuthService, Config, Database};

#[tokio::main]
async fn main() -> stile::Result<()> {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = stile::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        stile::logging::init_console_only(&config.logging.level);
    }

    info!("stile - credential authentication service");

    let db = Database::open(&config.database.path).await?;
    let auth = Arc::new(AuthService::with_session_ttl(
        db.pool().clone(),
        Duration::from_secs(config.session.ttl_secs),
    ));

    // Periodic sweep of expired sessions
    let sweeper = Arc::clone(&auth);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            sweeper.sessions().cleanup();
        }
    });

    let router = create_router(AppState::new(auth));
    serve(&config.server, router).await
}
