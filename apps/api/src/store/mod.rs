//! Profile and resume persistence.
//!
//! Handlers only see `Arc<dyn ProfileStore>`. `PgProfileStore` backs the service
//! when `DATABASE_URL` is set; otherwise `MemoryProfileStore` keeps profiles for
//! the life of the process. Tests use the in-memory store too.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::db::create_pool;

use crate::errors::AppError;
use crate::models::profile::{NewProfile, UserProfile};
use crate::models::resume::{ParsedResume, ResumeData};

pub mod memory;
pub mod postgres;

pub use memory::MemoryProfileStore;
pub use postgres::PgProfileStore;

/// Result of an idempotent profile create.
#[derive(Debug, Clone)]
pub enum CreateOutcome {
    Created(UserProfile),
    /// A profile with this uid already existed; it is returned unchanged.
    Existing(UserProfile),
}

/// Result of storing a parsed resume for a user.
#[derive(Debug, Clone)]
pub struct ResumeUpsert {
    pub resume: ResumeData,
    /// `true` when the user had no resume before this upload.
    pub created: bool,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn create_profile(&self, new: &NewProfile) -> Result<CreateOutcome, AppError>;

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError>;

    /// Replaces the user's resume wholesale, or creates it on first upload.
    async fn upsert_resume(
        &self,
        uid: &str,
        parsed: ParsedResume,
    ) -> Result<ResumeUpsert, AppError>;

    async fn get_resume(&self, uid: &str) -> Result<Option<ResumeData>, AppError>;
}

/// Opens the PostgreSQL store when a database is configured, the in-memory one
/// otherwise.
pub async fn open_store(database_url: Option<&str>) -> anyhow::Result<Arc<dyn ProfileStore>> {
    match database_url {
        Some(url) => Ok(Arc::new(PgProfileStore::new(create_pool(url).await?))),
        None => {
            warn!("DATABASE_URL not set, profiles are kept in memory and lost on restart");
            Ok(Arc::new(MemoryProfileStore::new()))
        }
    }
}

pub(crate) fn duplicate_email(email: &str) -> AppError {
    AppError::Validation(format!(
        "email: user profile with email '{email}' already exists"
    ))
}
