//! Library console API server: loads settings and the table catalogue, connects to MySQL,
//! mounts health, metadata and record routes.

use axum::http::HeaderValue;
use library_console::{app, load_config, AppState, MySqlStore, Settings};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("library_console=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let config = load_config(settings.config_path.as_deref()).await?;
    tracing::info!(tables = config.registry.tables.len(), "catalogue loaded");

    let pool = sqlx::mysql::MySqlPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    let state = AppState::new(Arc::new(MySqlStore::new(pool)), config.registry);

    let origin = HeaderValue::from_str(&settings.cors_origin)?;
    let router = app(state, origin);

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    tracing::info!("API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
