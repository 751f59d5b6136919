mod config;
mod db;
mod errors;
mod extraction;
mod models;
mod pipeline;
mod routes;
mod search;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::client::HttpExtractor;
use crate::routes::build_router;
use crate::search::embedding::HttpEmbedder;
use crate::state::AppState;
use crate::store::repository::CandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Refinery API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    let store = CandidateStore::new(pool, config.resume_table.clone());
    info!("Candidate store ready (table: {})", config.resume_table);

    // Initialize the extraction-service transport
    let extractor = Arc::new(HttpExtractor::new(config.extractor_base_url.clone())?);
    info!(
        "Extraction client initialized (base: {})",
        config.extractor_base_url
    );

    // Initialize the embedder used for semantic re-ranking
    let embedder = Arc::new(HttpEmbedder::new(config.embeddings_api_key.clone())?);
    info!(
        "Embedding client initialized (model: {})",
        search::embedding::EMBEDDING_MODEL
    );

    // Build app state
    let state = AppState {
        store,
        extractor,
        embedder,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
