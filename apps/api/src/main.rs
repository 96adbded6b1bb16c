mod archive;
mod cache;
mod config;
mod db;
mod errors;
mod identity;
mod llm_client;
mod models;
mod profiles;
mod questions;
mod recommendations;
mod resume;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::archive::ResumeArchive;
use crate::cache::RecommendationCache;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::open_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Prep API v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(config.database_url.as_deref()).await?;
    let mut state = AppState::new(store, config.clone());

    match &config.anthropic_api_key {
        Some(key) => {
            state.llm = Some(LlmClient::new(key.clone())?);
            info!("LLM client initialized (model: {})", llm_client::MODEL);
        }
        None => warn!("ANTHROPIC_API_KEY not set, AI features use deterministic fallbacks"),
    }

    if let Some(url) = &config.redis_url {
        state.cache = Some(RecommendationCache::new(
            url,
            config.recommendation_cache_ttl_secs,
        )?);
        info!(
            "Recommendation cache enabled (ttl {}s)",
            config.recommendation_cache_ttl_secs
        );
    }

    if let Some(archive) = &config.archive {
        state.archive = Some(ResumeArchive::connect(archive).await);
        info!("Resume archival enabled (bucket {})", archive.bucket);
    }

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
