//! Caller identification: the uid comes from `?uid=` or the `X-User-UID` header.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, HeaderMap},
};
use serde::Deserialize;

use crate::errors::AppError;

pub const UID_HEADER: &str = "x-user-uid";

#[derive(Debug, Deserialize)]
struct UidQuery {
    uid: Option<String>,
}

/// The requesting user's uid. Rejects with 400 "UID is required" when absent.
#[derive(Debug, Clone)]
pub struct RequestUid(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestUid
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_query = Query::<UidQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.uid);

        from_query
            .or_else(|| header_uid(&parts.headers))
            .filter(|uid| !uid.trim().is_empty())
            .map(|uid| RequestUid(uid.trim().to_string()))
            .ok_or_else(uid_required)
    }
}

pub fn header_uid(headers: &HeaderMap) -> Option<String> {
    headers
        .get(UID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn uid_required() -> AppError {
    AppError::Validation("UID is required".to_string())
}
