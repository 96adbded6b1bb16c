use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{NewProfile, UserProfile};
use crate::models::resume::{ParsedResume, ResumeData, ResumeRow};
use crate::store::{duplicate_email, CreateOutcome, ProfileStore, ResumeUpsert};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn create_profile(&self, new: &NewProfile) -> Result<CreateOutcome, AppError> {
        if let Some(existing) = self.get_profile(&new.uid).await? {
            return Ok(CreateOutcome::Existing(existing));
        }

        let inserted = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles (uid, email, name, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&new.uid)
        .bind(&new.email)
        .bind(&new.name)
        .bind(&new.phone)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(profile) => {
                info!("Created profile {}", profile.uid);
                Ok(CreateOutcome::Created(profile))
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                // Lost a race on the same uid, or the email belongs to someone else.
                match self.get_profile(&new.uid).await? {
                    Some(existing) => Ok(CreateOutcome::Existing(existing)),
                    None => Err(duplicate_email(&new.email)),
                }
            }
            Err(e) => Err(AppError::Database(e)),
        }
    }

    async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        let profile =
            sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE uid = $1")
                .bind(uid)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }

    async fn upsert_resume(
        &self,
        uid: &str,
        parsed: ParsedResume,
    ) -> Result<ResumeUpsert, AppError> {
        if self.get_profile(uid).await?.is_none() {
            return Err(AppError::NotFound("User profile not found".to_string()));
        }

        let existed: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM resume_data WHERE user_uid = $1)")
                .bind(uid)
                .fetch_one(&self.pool)
                .await?;

        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resume_data
                (user_uid, full_name, email, phone, location, linkedin, github, website,
                 summary, experience, education, skills, projects, certifications, languages,
                 years_of_experience, key_strengths, raw_text, file_name, file_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20)
            ON CONFLICT (user_uid) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                linkedin = EXCLUDED.linkedin,
                github = EXCLUDED.github,
                website = EXCLUDED.website,
                summary = EXCLUDED.summary,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                skills = EXCLUDED.skills,
                projects = EXCLUDED.projects,
                certifications = EXCLUDED.certifications,
                languages = EXCLUDED.languages,
                years_of_experience = EXCLUDED.years_of_experience,
                key_strengths = EXCLUDED.key_strengths,
                raw_text = EXCLUDED.raw_text,
                file_name = EXCLUDED.file_name,
                file_url = EXCLUDED.file_url,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(uid)
        .bind(&parsed.full_name)
        .bind(&parsed.email)
        .bind(&parsed.phone)
        .bind(&parsed.location)
        .bind(&parsed.linkedin)
        .bind(&parsed.github)
        .bind(&parsed.website)
        .bind(&parsed.summary)
        .bind(Json(&parsed.experience))
        .bind(Json(&parsed.education))
        .bind(&parsed.skills)
        .bind(Json(&parsed.projects))
        .bind(&parsed.certifications)
        .bind(&parsed.languages)
        .bind(parsed.years_of_experience)
        .bind(&parsed.key_strengths)
        .bind(&parsed.raw_text)
        .bind(&parsed.file_name)
        .bind(&parsed.file_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(ResumeUpsert {
            resume: row.into(),
            created: !existed,
        })
    }

    async fn get_resume(&self, uid: &str) -> Result<Option<ResumeData>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resume_data WHERE user_uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ResumeData::from))
    }
}
