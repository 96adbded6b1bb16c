use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::identity::RequestUid;
use crate::recommendations::{recommend, Recommendation, Source};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub name: Option<String>,
    pub years_experience: Option<i32>,
    pub skills_count: usize,
    pub projects_count: usize,
    pub key_strengths: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Recommendation,
    pub resume_summary: ResumeSummary,
}

/// GET /api/recommendations/?uid=
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    RequestUid(uid): RequestUid,
) -> Result<Json<RecommendationsResponse>, AppError> {
    if state.store.get_profile(&uid).await?.is_none() {
        return Err(AppError::NotFound("User profile not found".to_string()));
    }
    let resume = state.store.get_resume(&uid).await?.ok_or_else(|| {
        AppError::NotFound("Resume not found. Please upload your resume first.".to_string())
    })?;
    let parsed = &resume.parsed;

    let cached = match &state.cache {
        Some(cache) => cache.get::<Recommendation>(&uid).await,
        None => None,
    };

    let recommendations = match cached {
        Some(rec) => {
            info!("Serving cached recommendations for {uid}");
            rec
        }
        None => {
            let (rec, source) = recommend(state.llm.as_ref(), parsed).await;
            if source == Source::Llm {
                if let Some(cache) = &state.cache {
                    cache.put(&uid, &rec).await;
                }
            }
            rec
        }
    };

    Ok(Json(RecommendationsResponse {
        recommendations,
        resume_summary: ResumeSummary {
            name: parsed.full_name.clone(),
            years_experience: parsed.years_of_experience,
            skills_count: parsed.skills.len(),
            projects_count: parsed.projects.len(),
            key_strengths: parsed.key_strengths.clone(),
        },
    }))
}
