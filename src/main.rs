use std::net::SocketAddr;
use std::sync::Arc;

use course_explorer::api::router;
use course_explorer::db::{DocumentStore, StoreConfig};
use course_explorer::drive::{DriveClient, DriveConfig, DriveHttpClient};
use course_explorer::error::AppError;
use course_explorer::state::AppState;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_explorer=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The store connects lazily on the first request that needs it.
    let store = Arc::new(DocumentStore::new(StoreConfig::new_from_env()?));
    let drive: Arc<dyn DriveClient> = Arc::new(DriveHttpClient::new(DriveConfig::new_from_env()?)?);

    let state = AppState { store, drive };

    let app = router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .map_err(|e| AppError::Configuration(format!("invalid BIND_ADDR: {}", e)))?;
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
