use std::sync::Arc;

use crate::archive::ResumeArchive;
use crate::cache::RecommendationCache;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production, in-memory in tests.
    pub store: Arc<dyn ProfileStore>,
    /// `None` when no API key is configured; callers fall back to defaults.
    pub llm: Option<LlmClient>,
    pub cache: Option<RecommendationCache>,
    pub archive: Option<ResumeArchive>,
    pub config: Config,
}

impl AppState {
    /// State with no LLM, cache or archive attached.
    pub fn new(store: Arc<dyn ProfileStore>, config: Config) -> Self {
        Self {
            store,
            llm: None,
            cache: None,
            archive: None,
            config,
        }
    }
}
