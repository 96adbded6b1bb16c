use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

/// Everything extracted from one uploaded resume file, before it is attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedResume {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub years_of_experience: Option<i32>,
    pub key_strengths: Vec<String>,
    pub raw_text: Option<String>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
}

/// A stored resume, one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeData {
    pub id: i64,
    /// Owning profile uid.
    pub user: String,
    #[serde(flatten)]
    pub parsed: ParsedResume,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: i64,
    pub user_uid: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub experience: Json<Vec<ExperienceItem>>,
    pub education: Json<Vec<EducationItem>>,
    pub skills: Vec<String>,
    pub projects: Json<Vec<ProjectItem>>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub years_of_experience: Option<i32>,
    pub key_strengths: Vec<String>,
    pub raw_text: Option<String>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeData {
    fn from(row: ResumeRow) -> Self {
        ResumeData {
            id: row.id,
            user: row.user_uid,
            parsed: ParsedResume {
                full_name: row.full_name,
                email: row.email,
                phone: row.phone,
                location: row.location,
                linkedin: row.linkedin,
                github: row.github,
                website: row.website,
                summary: row.summary,
                experience: row.experience.0,
                education: row.education.0,
                skills: row.skills,
                projects: row.projects.0,
                certifications: row.certifications,
                languages: row.languages,
                years_of_experience: row.years_of_experience,
                key_strengths: row.key_strengths,
                raw_text: row.raw_text,
                file_name: row.file_name,
                file_url: row.file_url,
            },
            uploaded_at: row.uploaded_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_data_serializes_flat() {
        let now = Utc::now();
        let data = ResumeData {
            id: 7,
            user: "uid-1".to_string(),
            parsed: ParsedResume {
                full_name: Some("Ada Lovelace".to_string()),
                skills: vec!["Rust".to_string()],
                ..Default::default()
            },
            uploaded_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["user"], "uid-1");
        assert_eq!(json["full_name"], "Ada Lovelace");
        assert_eq!(json["skills"][0], "Rust");
        assert!(json.get("parsed").is_none());
    }

    #[test]
    fn test_experience_item_tolerates_missing_optional_fields() {
        let item: ExperienceItem =
            serde_json::from_str(r#"{"title": "Software Engineer"}"#).unwrap();
        assert_eq!(item.title, "Software Engineer");
        assert!(item.company.is_none());
        assert_eq!(item.description, "");
    }
}
