use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports which optional services this instance was started with.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "prep-api",
        "version": env!("CARGO_PKG_VERSION"),
        "features": {
            "llm": state.llm.is_some(),
            "recommendation_cache": state.cache.is_some(),
            "resume_archive": state.archive.is_some()
        }
    }))
}
