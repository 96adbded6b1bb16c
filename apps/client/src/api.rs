//! Thin typed client for the prep backend.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures_util::stream;
use reqwest::{multipart, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::ResumeData;

pub const UID_HEADER: &str = "X-User-UID";

/// Upload body is streamed in chunks of this size so progress can be reported.
const UPLOAD_CHUNK: usize = 16 * 1024;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Server { status: StatusCode, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            ApiError::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// The message the server put in its error body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Accepts both `{"error": {"message": ..}}` and `{"error": ".."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Nested { message: String },
    Flat(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorField,
}

fn server_error(status: StatusCode, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: ErrorField::Nested { message },
        })
        | Ok(ErrorBody {
            error: ErrorField::Flat(message),
        }) => message,
        Err(_) => String::new(),
    };
    ApiError::Server { status, message }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub uid: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub uid: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resume: Option<ResumeData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileCreated {
    pub message: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeUploaded {
    pub message: String,
    pub resume: ResumeData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecommendationReasoning {
    pub goal_reason: String,
    pub level_reason: String,
    pub domain_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recommendation {
    pub goal: String,
    pub target_level: String,
    pub domain: String,
    pub reasoning: RecommendationReasoning,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResumeSummary {
    pub name: Option<String>,
    pub years_experience: Option<i32>,
    pub skills_count: usize,
    pub projects_count: usize,
    #[serde(default)]
    pub key_strengths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Recommendations {
    pub recommendations: Recommendation,
    pub resume_summary: ResumeSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionRequest {
    pub uid: String,
    /// `full`, `focused` or `quick`.
    pub goal: String,
    pub level: String,
    /// `dsa`, `web`, `ml` or `core`.
    pub domain: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub expected_answer_points: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedQuestions {
    pub questions: Vec<GeneratedQuestion>,
    pub total: usize,
}

/// Called with `(bytes_sent, bytes_total)` as the upload body is consumed.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            debug!(%status, "API error body: {body}");
            return Err(server_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn create_profile(&self, profile: &NewProfile) -> Result<ProfileCreated, ApiError> {
        let response = self
            .client
            .post(self.url("/profile/create/"))
            .json(profile)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_profile(&self, uid: &str) -> Result<Profile, ApiError> {
        let response = self
            .client
            .get(self.url("/profile/"))
            .query(&[("uid", uid)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_resume(&self, uid: &str) -> Result<ResumeData, ApiError> {
        let response = self
            .client
            .get(self.url("/resume/"))
            .query(&[("uid", uid)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_recommendations(&self, uid: &str) -> Result<Recommendations, ApiError> {
        let response = self
            .client
            .get(self.url("/recommendations/"))
            .query(&[("uid", uid)])
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn generate_questions(
        &self,
        request: &QuestionRequest,
    ) -> Result<GeneratedQuestions, ApiError> {
        let response = self
            .client
            .post(self.url("/questions/generate/"))
            .json(request)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Multipart upload of a resume file. `progress` is called with `(0, total)`
    /// when reqwest starts pulling the body, then after every chunk.
    pub async fn upload_resume(
        &self,
        uid: &str,
        file_name: &str,
        content: Bytes,
        progress: Option<ProgressFn>,
    ) -> Result<ResumeUploaded, ApiError> {
        let total = content.len() as u64;
        let chunks: Vec<Bytes> = (0..content.len())
            .step_by(UPLOAD_CHUNK)
            .map(|start| content.slice(start..(start + UPLOAD_CHUNK).min(content.len())))
            .collect();

        let mut sent = 0u64;
        let body = stream::iter(chunks.into_iter().map(move |chunk| {
            if let Some(report) = &progress {
                // (0, total) marks the request going out, before any file bytes.
                if sent == 0 {
                    report(0, total);
                }
                report(sent + chunk.len() as u64, total);
            }
            sent += chunk.len() as u64;
            Ok::<Bytes, std::io::Error>(chunk)
        }));

        let file = multipart::Part::stream_with_length(reqwest::Body::wrap_stream(body), total)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new()
            .part("file", file)
            .text("uid", uid.to_string());

        let response = self
            .client
            .post(self.url("/resume/upload/"))
            .header(UID_HEADER, uid)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn health(&self) -> Result<serde_json::Value, ApiError> {
        let root = self
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url);
        let response = self.client.get(format!("{root}/health")).send().await?;
        Self::decode(response).await
    }
}
