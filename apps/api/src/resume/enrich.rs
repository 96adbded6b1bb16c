//! LLM enrichment of a heuristically parsed resume.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::{clip, JSON_ONLY_SYSTEM, MAX_RESUME_CHARS};
use crate::llm_client::LlmClient;
use crate::models::resume::{EducationItem, ExperienceItem, ParsedResume, ProjectItem};
use crate::resume::prompts::RESUME_EXTRACT_PROMPT;

/// Shape the model is asked to return. Every field is optional: partial
/// answers still improve on the heuristic pass.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AiResume {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub years_of_experience: Option<i32>,
    pub skills: Vec<String>,
    pub education: Vec<EducationItem>,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub key_strengths: Vec<String>,
}

/// Asks the model for a full structured extraction.
pub async fn extract_with_llm(
    llm: &LlmClient,
    raw_text: &str,
    email_hint: &str,
) -> Result<AiResume, AppError> {
    let prompt = RESUME_EXTRACT_PROMPT
        .replace("{email_hint}", email_hint)
        .replace("{resume_text}", clip(raw_text, MAX_RESUME_CHARS));

    llm.call_json::<AiResume>(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume extraction failed: {e}")))
}

/// Runs the LLM pass when a client is configured and the file had text.
/// Any failure keeps the heuristic result.
pub async fn enrich(
    llm: Option<&LlmClient>,
    parsed: ParsedResume,
    email_hint: &str,
) -> ParsedResume {
    let Some(llm) = llm else {
        return parsed;
    };
    let raw_text = parsed.raw_text.clone().unwrap_or_default();
    if raw_text.trim().is_empty() {
        return parsed;
    }

    match extract_with_llm(llm, &raw_text, email_hint).await {
        Ok(ai) => {
            info!(
                skills = ai.skills.len(),
                experience = ai.experience.len(),
                education = ai.education.len(),
                "LLM resume extraction succeeded"
            );
            merge(parsed, ai)
        }
        Err(e) => {
            warn!("{e}; keeping heuristic extraction");
            parsed
        }
    }
}

/// Overlays every non-empty AI field onto the heuristic result.
pub fn merge(mut base: ParsedResume, ai: AiResume) -> ParsedResume {
    fn pick(current: &mut Option<String>, candidate: Option<String>) {
        if let Some(value) = candidate.filter(|v| !v.trim().is_empty()) {
            *current = Some(value.trim().to_string());
        }
    }
    fn pick_list<T>(current: &mut Vec<T>, candidate: Vec<T>) {
        if !candidate.is_empty() {
            *current = candidate;
        }
    }

    pick(&mut base.full_name, ai.full_name);
    pick(&mut base.email, ai.email);
    pick(&mut base.phone, ai.phone);
    pick(&mut base.location, ai.location);
    pick(&mut base.linkedin, ai.linkedin);
    pick(&mut base.github, ai.github);
    pick(&mut base.website, ai.website);
    pick(&mut base.summary, ai.summary);
    if ai.years_of_experience.is_some() {
        base.years_of_experience = ai.years_of_experience;
    }
    pick_list(&mut base.skills, ai.skills);
    pick_list(&mut base.education, ai.education);
    pick_list(&mut base.experience, ai.experience);
    pick_list(&mut base.projects, ai.projects);
    pick_list(&mut base.certifications, ai.certifications);
    pick_list(&mut base.languages, ai.languages);
    pick_list(&mut base.key_strengths, ai.key_strengths);
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_non_empty_ai_fields() {
        let base = ParsedResume {
            full_name: Some("SENIOR ENGINEER".to_string()),
            email: Some("ada@example.com".to_string()),
            skills: vec!["Python".to_string()],
            raw_text: Some("raw".to_string()),
            ..Default::default()
        };
        let ai = AiResume {
            full_name: Some("Ada Lovelace".to_string()),
            email: Some("  ".to_string()),
            skills: vec!["Rust".to_string(), "Python".to_string()],
            years_of_experience: Some(4),
            ..Default::default()
        };

        let merged = merge(base, ai);
        assert_eq!(merged.full_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(merged.email.as_deref(), Some("ada@example.com"));
        assert_eq!(merged.skills.len(), 2);
        assert_eq!(merged.years_of_experience, Some(4));
        assert_eq!(merged.raw_text.as_deref(), Some("raw"));
    }

    #[test]
    fn test_ai_resume_accepts_partial_and_null_fields() {
        let ai: AiResume = serde_json::from_str(
            r#"{"full_name": "Ada", "phone": null, "skills": ["Rust"], "unexpected": 1}"#,
        )
        .unwrap();
        assert_eq!(ai.full_name.as_deref(), Some("Ada"));
        assert!(ai.phone.is_none());
        assert!(ai.projects.is_empty());
    }

    #[tokio::test]
    async fn test_enrich_without_llm_is_identity() {
        let parsed = ParsedResume {
            full_name: Some("Ada".to_string()),
            raw_text: Some("Ada".to_string()),
            ..Default::default()
        };
        let out = enrich(None, parsed.clone(), "ada@example.com").await;
        assert_eq!(out, parsed);
    }
}
