mod config;
mod db;
mod errors;
mod listings;
mod models;
mod profiles;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::listings::JSearchClient;
use crate::profiles::postgres::PgProfileStore;
use crate::routes::build_router;
use crate::search::scoring::KeywordRelevanceScorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job search API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL-backed profile store
    let db = create_pool(&config.database_url).await?;
    let profiles = Arc::new(PgProfileStore::new(db));

    // Initialize JSearch client
    let listings = JSearchClient::new(
        config.jsearch_base_url.clone(),
        config.jsearch_host.clone(),
        config.rapidapi_key.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    )?;
    if config.rapidapi_key.is_none() {
        warn!("RAPIDAPI_KEY is not set; job searches will fail until it is configured");
    }
    info!("JSearch client initialized (base url: {})", config.jsearch_base_url);

    // Build app state
    let state = AppState {
        profiles,
        listings: Arc::new(listings),
        scorer: Arc::new(KeywordRelevanceScorer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
