mod config;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, HostConfig};

#[derive(Debug, thiserror::Error)]
enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Leptos(String),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: std::net::SocketAddr, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "homedeck host stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ServeError> {
    let config = HostConfig::from_env()?;
    let app = routes::app().map_err(ServeError::Leptos)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;

    tracing::info!(%addr, "homedeck listening");
    axum::serve(listener, app).await.map_err(ServeError::Serve)
}
