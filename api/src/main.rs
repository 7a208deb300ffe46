use api::{
    AppState, app,
    config::{Config, StoreBackend},
    store::{DataStore, MemoryStore, PostgrestStore},
};
use std::{process::ExitCode, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let store: Arc<dyn DataStore> = match &config.store {
        StoreBackend::Postgrest { url, key } => {
            info!("Using hosted data store at {}", url);
            Arc::new(PostgrestStore::new(url, key)?)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory data store, nothing will be persisted");
            Arc::new(MemoryStore::new())
        }
    };

    if !config.frontend_dir.join("index.html").is_file() {
        warn!(
            "Frontend entry file not found under {}",
            config.frontend_dir.display()
        );
    }

    let state = AppState::new(store).with_hash_cost(config.hash_cost);
    let router = app(state, &config.frontend_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health                    - Health check");
    info!("  POST   /api/v1/auth/register      - Create account");
    info!("  GET    /api/v1/users/me           - Current user (X-User-Email)");
    info!("  GET    /api/v1/posts              - List posts (X-User-Email)");
    info!("  POST   /api/v1/posts              - Create post (X-User-Email)");
    info!("  GET    /api/v1/posts/{{id}}         - Get post (X-User-Email)");
    info!("  DELETE /api/v1/posts/{{id}}         - Delete post (X-User-Email, author only)");

    axum::serve(listener, router).await?;

    Ok(())
}
