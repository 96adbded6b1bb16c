//! Axum route handlers for the Profile API.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::identity::RequestUid;
use crate::models::profile::{NewProfile, ProfileView, UserProfile};
use crate::state::AppState;
use crate::store::CreateOutcome;

#[derive(Debug, Serialize)]
pub struct ProfileCreatedResponse {
    pub message: &'static str,
    pub profile: ProfileView,
}

/// POST /api/profile/create/
///
/// Idempotent by uid: an existing profile is returned with 200 instead of 201.
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Json(request): Json<NewProfile>,
) -> Result<(StatusCode, Json<ProfileCreatedResponse>), AppError> {
    request.validate()?;

    let (status, message, profile) = match state.store.create_profile(&request).await? {
        CreateOutcome::Created(p) => (StatusCode::CREATED, "Profile created successfully", p),
        CreateOutcome::Existing(p) => (StatusCode::OK, "Profile already exists", p),
    };
    info!("Profile {} -> {}", profile.uid, status);

    let profile = with_resume(&state, profile).await?;
    Ok((status, Json(ProfileCreatedResponse { message, profile })))
}

/// GET /api/profile/?uid=
pub async fn handle_get_profile(
    State(state): State<AppState>,
    RequestUid(uid): RequestUid,
) -> Result<Json<ProfileView>, AppError> {
    let profile = state
        .store
        .get_profile(&uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(with_resume(&state, profile).await?))
}

async fn with_resume(state: &AppState, profile: UserProfile) -> Result<ProfileView, AppError> {
    let resume = state.store.get_resume(&profile.uid).await?;
    Ok(ProfileView { profile, resume })
}
