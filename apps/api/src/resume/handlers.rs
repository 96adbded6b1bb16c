//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::identity::{header_uid, uid_required, RequestUid};
use crate::models::resume::ResumeData;
use crate::resume::enrich::enrich;
use crate::resume::extract::{extract_text, ResumeFormat};
use crate::resume::parser::parse_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub message: &'static str,
    pub resume: ResumeData,
}

struct UploadedFile {
    name: String,
    bytes: Bytes,
}

/// POST /api/resume/upload/
///
/// Multipart form with a `file` part and a `uid` part (or `X-User-UID` header).
/// The file is parsed, optionally enriched by the LLM and archived, and the
/// result replaces the user's stored resume. 201 on first upload, 200 after.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeUploadResponse>), AppError> {
    let mut form_uid = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or("resume").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file: {e}")))?;
                file = Some(UploadedFile { name, bytes });
            }
            Some("uid") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read uid: {e}")))?;
                form_uid = Some(text);
            }
            _ => {}
        }
    }

    let uid = form_uid
        .or_else(|| header_uid(&headers))
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(uid_required)?;

    let profile = state
        .store
        .get_profile(&uid)
        .await?
        .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))?;

    let file = file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if file.bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File size must be less than {} bytes",
            state.config.max_upload_bytes
        )));
    }

    let raw_text = {
        let bytes = file.bytes.clone();
        let name = file.name.clone();
        tokio::task::spawn_blocking(move || extract_text(&bytes, &name))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Text extraction task failed: {e}")))?
    };

    let parsed = parse_resume(&raw_text, &file.name);
    info!(
        "Parsed resume for {uid}: name={:?} email={:?} skills={}",
        parsed.full_name,
        parsed.email,
        parsed.skills.len()
    );

    let mut parsed = enrich(state.llm.as_ref(), parsed, &profile.email).await;

    if let Some(archive) = &state.archive {
        let content_type = ResumeFormat::from_file_name(&file.name).content_type();
        match archive
            .store(&uid, &file.name, content_type, file.bytes.clone())
            .await
        {
            Ok(url) => parsed.file_url = Some(url),
            Err(e) => warn!("Resume archival failed for {uid}, continuing without file_url: {e}"),
        }
    }

    let upsert = state.store.upsert_resume(&uid, parsed).await?;

    if let Some(cache) = &state.cache {
        cache.invalidate(&uid).await;
    }

    let status = if upsert.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ResumeUploadResponse {
            message: "Resume analyzed and data saved successfully",
            resume: upsert.resume,
        }),
    ))
}

/// GET /api/resume/?uid=
pub async fn handle_get_resume(
    State(state): State<AppState>,
    RequestUid(uid): RequestUid,
) -> Result<Json<ResumeData>, AppError> {
    if state.store.get_profile(&uid).await?.is_none() {
        return Err(AppError::NotFound("User profile not found".to_string()));
    }

    let resume = state
        .store
        .get_resume(&uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    Ok(Json(resume))
}
