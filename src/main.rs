//! Sanctuary server binary
//!
//! Wires up:
//! - In-memory repository, optionally seeded from `FIXTURES_PATH`
//! - Livestream application service
//! - JSON HTTP adapter

use sanctuary::adapters::http;
use sanctuary::{logging, LiveStreamService, MemoryRepository, ServerConfig};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();

    logging::init(config.log_format);

    // 1. Adapters
    let repo = match &config.fixtures_path {
        Some(path) => match MemoryRepository::load(path).await {
            Ok(repo) => repo,
            Err(e) => {
                tracing::error!("Failed to load fixtures: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("FIXTURES_PATH not set, starting with an empty repository");
            MemoryRepository::new()
        }
    };

    // 2. Application Services
    let service = Arc::new(LiveStreamService::new(repo));

    // 3. HTTP Layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = http::router(service).layer(cors);

    // 4. Start Server
    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .expect("Failed to bind TCP listener");
    tracing::info!("Listening at {}", config.bind_address());
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
