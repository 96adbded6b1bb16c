use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::questions::{generate_questions, InterviewGoal, InterviewQuestion};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub uid: Option<String>,
    pub goal: Option<String>,
    pub level: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionConfig {
    pub goal: String,
    pub level: String,
    pub domain: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<InterviewQuestion>,
    pub total: usize,
    pub config: QuestionConfig,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// POST /api/questions/generate/
///
/// Personalised with the caller's stored resume when one exists; a missing
/// profile or resume just yields generic questions.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(req): Json<GenerateQuestionsRequest>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    let (Some(uid), Some(goal), Some(level), Some(domain)) = (
        present(req.uid),
        present(req.goal),
        present(req.level),
        present(req.domain),
    ) else {
        return Err(AppError::Validation(
            "Missing required parameters (uid, goal, level, domain)".to_string(),
        ));
    };

    let resume = match state.store.get_profile(&uid).await? {
        Some(_) => state.store.get_resume(&uid).await?,
        None => None,
    };
    if resume.is_none() {
        info!("No resume data for {uid}, generating generic questions");
    }

    let questions = generate_questions(
        state.llm.as_ref(),
        InterviewGoal::parse(&goal),
        &level,
        &domain,
        resume.as_ref().map(|r| &r.parsed),
    )
    .await;

    Ok(Json(GenerateQuestionsResponse {
        total: questions.len(),
        questions,
        config: QuestionConfig {
            goal,
            level,
            domain,
        },
    }))
}
