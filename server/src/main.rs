mod config;
mod db;
mod routes;
mod services;
mod state;

use leptos::prelude::get_configuration;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, ServerConfig};

const DEFAULT_LOG_FILTER: &str = "info,sqlx=warn";

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // A missing .env is normal outside local development.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "startup failed");
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    if config.email.is_none() {
        tracing::warn!(echo = config.echo_codes, "RESEND_API_KEY not set; verification emails disabled");
    }

    let leptos_options = get_configuration(None)
        .map_err(|e| StartupError::Leptos(e.to_string()))?
        .leptos_options;

    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    let port = config.port;
    let state = state::AppState::new(pool, config);

    let app = routes::app(state, leptos_options);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "storefront listening");
    axum::serve(listener, app).await?;
    Ok(())
}
