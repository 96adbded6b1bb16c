//! Interview setup recommendations derived from a stored resume.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::resume::ParsedResume;

pub mod handlers;
pub mod prompts;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReasoning {
    pub goal_reason: String,
    pub level_reason: String,
    pub domain_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub goal: String,
    pub target_level: String,
    pub domain: String,
    pub reasoning: RecommendationReasoning,
}

impl Recommendation {
    /// Entry-level focused practice, with `reason` repeated for every field.
    pub fn fallback(reason: &str) -> Self {
        Self {
            goal: "Focused Practice".to_string(),
            target_level: "Entry Level".to_string(),
            domain: "Software Development".to_string(),
            reasoning: RecommendationReasoning {
                goal_reason: reason.to_string(),
                level_reason: reason.to_string(),
                domain_reason: reason.to_string(),
            },
        }
    }
}

/// Where a recommendation came from. Only `Llm` results are worth caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Llm,
    Fallback,
}

pub async fn recommend(llm: Option<&LlmClient>, resume: &ParsedResume) -> (Recommendation, Source) {
    let Some(llm) = llm else {
        return (
            Recommendation::fallback("API key not configured"),
            Source::Fallback,
        );
    };

    let prompt = prompts::RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{resume_summary}", &prompts::resume_summary(resume));

    match llm
        .call_json::<Recommendation>(&prompt, JSON_ONLY_SYSTEM)
        .await
    {
        Ok(rec) => (rec, Source::Llm),
        Err(e) => {
            warn!("Recommendation generation failed: {e}");
            (
                Recommendation::fallback("Default recommendation"),
                Source::Fallback,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_without_llm_returns_unconfigured_fallback() {
        let (rec, source) = recommend(None, &ParsedResume::default()).await;
        assert_eq!(source, Source::Fallback);
        assert_eq!(rec.goal, "Focused Practice");
        assert_eq!(rec.target_level, "Entry Level");
        assert_eq!(rec.domain, "Software Development");
        assert_eq!(rec.reasoning.level_reason, "API key not configured");
    }

    #[test]
    fn test_recommendation_parses_model_output() {
        let json = r#"{
            "goal": "Full Technical Interview",
            "target_level": "Mid Level",
            "domain": "Backend Development",
            "reasoning": {
                "goal_reason": "3 years of experience",
                "level_reason": "several shipped services",
                "domain_reason": "Django and PostgreSQL"
            }
        }"#;
        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.target_level, "Mid Level");
        assert_eq!(rec.reasoning.domain_reason, "Django and PostgreSQL");
    }
}
