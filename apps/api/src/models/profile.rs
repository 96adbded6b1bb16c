use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::resume::ResumeData;

/// A user profile keyed by the identity provider's uid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile as returned by the API, with the parsed resume nested when one exists.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub resume: Option<ResumeData>,
}

/// Body of `POST /api/profile/create/`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProfile {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub phone: Option<String>,
}

const MAX_PHONE_LEN: usize = 20;

impl NewProfile {
    /// Field-level checks. All failures are reported together.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if self.uid.trim().is_empty() {
            problems.push("uid: this field is required");
        }
        if self.name.trim().is_empty() {
            problems.push("name: this field is required");
        }
        if self.email.trim().is_empty() {
            problems.push("email: this field is required");
        } else if !looks_like_email(self.email.trim()) {
            problems.push("email: enter a valid email address");
        }
        if self
            .phone
            .as_deref()
            .is_some_and(|p| p.chars().count() > MAX_PHONE_LEN)
        {
            problems.push("phone: ensure this field has no more than 20 characters");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && domain.contains('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(uid: &str, email: &str, name: &str) -> NewProfile {
        NewProfile {
            uid: uid.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(profile("abc123", "ada@example.com", "Ada Lovelace")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let err = profile("", "", "").validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("uid"));
        assert!(msg.contains("name"));
        assert!(msg.contains("email"));
    }

    #[test]
    fn test_malformed_email_rejected() {
        for bad in ["ada", "ada@", "ada@example", "@example.com", "a da@example.com"] {
            assert!(
                profile("u1", bad, "Ada").validate().is_err(),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_long_phone_rejected() {
        let mut p = profile("u1", "ada@example.com", "Ada");
        p.phone = Some("1".repeat(21));
        assert!(p.validate().is_err());
    }
}
