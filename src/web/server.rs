//! HTTP server startup for stile.

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::Result;

/// Bind and serve the API until the process is stopped.
pub async fn serve(config: &ServerConfig, router: Router) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
