use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::profile::{NewProfile, UserProfile};
use crate::models::resume::{ParsedResume, ResumeData};
use crate::store::{duplicate_email, CreateOutcome, ProfileStore, ResumeUpsert};

/// In-process store. Same semantics as the Postgres store, nothing survives a restart.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, UserProfile>>,
    resumes: RwLock<HashMap<String, ResumeData>>,
    next_resume_id: AtomicI64,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn create_profile(&self, new: &NewProfile) -> Result<CreateOutcome, AppError> {
        let mut profiles = self.profiles.write().await;

        if let Some(existing) = profiles.get(&new.uid) {
            return Ok(CreateOutcome::Existing(existing.clone()));
        }
        if profiles
            .values()
            .any(|p| p.email.eq_ignore_ascii_case(&new.email))
        {
            return Err(duplicate_email(&new.email));
        }

        let now = Utc::now();
        let profile = UserProfile {
            uid: new.uid.clone(),
            email: new.email.clone(),
            name: new.name.clone(),
            phone: new.phone.clone(),
            created_at: now,
            updated_at: now,
        };
        profiles.insert(profile.uid.clone(), profile.clone());
        Ok(CreateOutcome::Created(profile))
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.profiles.read().await.get(uid).cloned())
    }

    async fn upsert_resume(
        &self,
        uid: &str,
        parsed: ParsedResume,
    ) -> Result<ResumeUpsert, AppError> {
        if !self.profiles.read().await.contains_key(uid) {
            return Err(AppError::NotFound("User profile not found".to_string()));
        }

        let mut resumes = self.resumes.write().await;
        let now = Utc::now();

        match resumes.get_mut(uid) {
            Some(existing) => {
                existing.parsed = parsed;
                existing.updated_at = now;
                Ok(ResumeUpsert {
                    resume: existing.clone(),
                    created: false,
                })
            }
            None => {
                let resume = ResumeData {
                    id: self.next_resume_id.fetch_add(1, Ordering::Relaxed) + 1,
                    user: uid.to_string(),
                    parsed,
                    uploaded_at: now,
                    updated_at: now,
                };
                resumes.insert(uid.to_string(), resume.clone());
                Ok(ResumeUpsert {
                    resume,
                    created: true,
                })
            }
        }
    }

    async fn get_resume(&self, uid: &str) -> Result<Option<ResumeData>, AppError> {
        Ok(self.resumes.read().await.get(uid).cloned())
    }
}
