//! Direct Configuration Service Binary
//!
//! Runs the configuration registry HTTP server.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use direct_config_service::{create_router, AppState, ConfigStore, MemoryStore, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = open_store(&config).await?;
    let state = Arc::new(AppState::new(store));
    let app = create_router(state);

    let addr = config.socket_addr();
    info!(
        addr = %addr,
        persistent = config.database_url.is_some(),
        "Starting configuration service"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn ConfigStore>, Box<dyn std::error::Error>> {
    match &config.database_url {
        Some(url) => Ok(Arc::new(direct_config_service::PostgresStore::new(url).await?)),
        None => Ok(Arc::new(MemoryStore::new())),
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn ConfigStore>, Box<dyn std::error::Error>> {
    if config.database_url.is_some() {
        tracing::warn!("DIRECT_CONFIG_DATABASE_URL is set but the postgres feature is disabled; using memory store");
    }
    Ok(Arc::new(MemoryStore::new()))
}
