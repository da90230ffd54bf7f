mod config;
mod constants;
mod handlers;
mod state;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use config::{MetadataBackend, ServerConfig};
use docstore::{
    DocumentService, FsBlobStore, InMemoryRepository, MetadataRepository, PgMetadataRepository,
    StoreConfig,
};
use state::AppState;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing with env filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info")
                    .add_directive("actix_server::worker=warn".parse().unwrap())
                    .add_directive("actix_server::accept=warn".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting document store server (PID: {})",
        std::process::id()
    );

    let config = ServerConfig::load()?;

    let store_config = StoreConfig::new(&config.root_dir).map_err(|e| {
        error!(
            "Failed to prepare storage root {:?}: {}",
            config.root_dir, e
        );
        e
    })?;
    info!("Storage root: {:?}", store_config.root());

    let metadata: Arc<dyn MetadataRepository> = match config.metadata_backend {
        MetadataBackend::Database => {
            let database_url = config.database_url.clone().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "Database URL required for the 'db' backend",
                )
            })?;
            info!("Connecting to PostgreSQL metadata repository...");
            let repo = PgMetadataRepository::connect(&database_url)
                .await
                .map_err(|e| {
                    error!("Failed to initialize metadata repository: {}", e);
                    std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Failed to initialize metadata repository: {}", e),
                    )
                })?;
            Arc::new(repo)
        }
        MetadataBackend::Memory => {
            warn!("Using in-memory metadata repository; document metadata is lost on restart");
            Arc::new(InMemoryRepository::new())
        }
    };

    let service = DocumentService::new(store_config, Arc::new(FsBlobStore::new()), metadata);
    let state = web::Data::new(AppState::new(service));

    let bind_address = config.bind_address();
    info!("Starting server on http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(handlers::upload::upload)
            .service(handlers::download::download)
            .service(handlers::documents::get)
            .service(handlers::documents::list)
            .service(handlers::delete::delete)
            .service(handlers::delete::delete_all)
            .service(handlers::health::health)
    })
    .bind(&bind_address)
    .map_err(|e| {
        error!("Failed to bind to {}: {}", bind_address, e);
        e
    })?
    .run()
    .await
}
