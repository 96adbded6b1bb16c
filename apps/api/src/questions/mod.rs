//! Interview question generation: LLM-personalised when available, curated
//! default banks otherwise.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::resume::ParsedResume;
use crate::questions::prompts::{resume_context, QUESTIONS_PROMPT_TEMPLATE};

pub mod defaults;
pub mod handlers;
pub mod prompts;

/// Session length the candidate asked for. Drives how many questions are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewGoal {
    /// 45–60 minute interview.
    Full,
    /// 20–30 minute practice.
    Focused,
    /// 15 minute mock.
    Quick,
    Other,
}

impl InterviewGoal {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full" => InterviewGoal::Full,
            "focused" => InterviewGoal::Focused,
            "quick" => InterviewGoal::Quick,
            _ => InterviewGoal::Other,
        }
    }

    pub fn question_count(self) -> usize {
        match self {
            InterviewGoal::Full => 8,
            InterviewGoal::Focused => 5,
            InterviewGoal::Quick => 3,
            InterviewGoal::Other => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InterviewGoal::Full => "Full Technical Interview",
            InterviewGoal::Focused | InterviewGoal::Other => "Focused Practice",
            InterviewGoal::Quick => "Quick Mock",
        }
    }
}

/// Serialized lowercase. Model output is matched case-insensitively so that
/// `"Coding"` or `"HARD"` do not discard the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum QuestionKind {
    Conceptual,
    Coding,
    Scenario,
}

impl TryFrom<String> for QuestionKind {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "conceptual" => Ok(QuestionKind::Conceptual),
            "coding" => Ok(QuestionKind::Coding),
            "scenario" => Ok(QuestionKind::Scenario),
            _ => Err(format!("unknown question type '{raw}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl TryFrom<String> for QuestionDifficulty {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(QuestionDifficulty::Easy),
            "medium" => Ok(QuestionDifficulty::Medium),
            "hard" => Ok(QuestionDifficulty::Hard),
            _ => Err(format!("unknown difficulty '{raw}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub difficulty: QuestionDifficulty,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub expected_answer_points: Vec<String>,
}

/// Produces exactly `goal.question_count()` questions. LLM output of the wrong
/// length is trimmed or padded from the default bank.
pub async fn generate_questions(
    llm: Option<&LlmClient>,
    goal: InterviewGoal,
    level: &str,
    domain: &str,
    resume: Option<&ParsedResume>,
) -> Vec<InterviewQuestion> {
    let count = goal.question_count();

    let Some(llm) = llm else {
        info!("No LLM configured, serving default {domain} questions");
        return defaults::default_questions(goal, domain);
    };

    match generate_with_llm(llm, goal, level, domain, resume).await {
        Ok(mut questions) if !questions.is_empty() => {
            info!(
                "Generated {} questions for {domain} at {level} level",
                questions.len()
            );
            if questions.len() < count {
                let fill = defaults::default_questions(goal, domain);
                questions.extend(fill.into_iter().take(count - questions.len()));
            }
            questions.truncate(count);
            questions
        }
        Ok(_) => {
            warn!("LLM returned no questions, serving defaults");
            defaults::default_questions(goal, domain)
        }
        Err(e) => {
            warn!("{e}; serving default questions");
            defaults::default_questions(goal, domain)
        }
    }
}

async fn generate_with_llm(
    llm: &LlmClient,
    goal: InterviewGoal,
    level: &str,
    domain: &str,
    resume: Option<&ParsedResume>,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let prompt = QUESTIONS_PROMPT_TEMPLATE
        .replace("{count}", &goal.question_count().to_string())
        .replace("{goal}", goal.label())
        .replace("{level}", level)
        .replace("{domain}", domain)
        .replace(
            "{resume_context}",
            &resume.map(resume_context).unwrap_or_default(),
        );

    llm.call_json::<Vec<InterviewQuestion>>(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_parsing_and_counts() {
        assert_eq!(InterviewGoal::parse("full").question_count(), 8);
        assert_eq!(InterviewGoal::parse(" Focused ").question_count(), 5);
        assert_eq!(InterviewGoal::parse("QUICK").question_count(), 3);
        assert_eq!(InterviewGoal::parse("marathon"), InterviewGoal::Other);
        assert_eq!(InterviewGoal::Other.question_count(), 5);
    }

    #[test]
    fn test_question_wire_format() {
        let json = r#"{
            "question": "Reverse a linked list.",
            "type": "coding",
            "difficulty": "medium",
            "topics": ["linked lists"],
            "expected_answer_points": ["O(n)"]
        }"#;
        let q: InterviewQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.kind, QuestionKind::Coding);
        assert_eq!(q.difficulty, QuestionDifficulty::Medium);

        let back = serde_json::to_value(&q).unwrap();
        assert_eq!(back["type"], "coding");
    }

    #[test]
    fn test_model_casing_is_accepted() {
        let json = r#"[
            {"question": "Explain ownership.", "type": "Conceptual", "difficulty": "EASY"},
            {"question": "Handle a flaky deploy.", "type": " Scenario ", "difficulty": "Hard"}
        ]"#;
        let questions: Vec<InterviewQuestion> = serde_json::from_str(json).unwrap();
        assert_eq!(questions[0].kind, QuestionKind::Conceptual);
        assert_eq!(questions[0].difficulty, QuestionDifficulty::Easy);
        assert_eq!(questions[1].kind, QuestionKind::Scenario);

        let back = serde_json::to_value(&questions[1]).unwrap();
        assert_eq!(back["difficulty"], "hard");

        let unknown = r#"{"question": "?", "type": "trivia", "difficulty": "easy"}"#;
        assert!(serde_json::from_str::<InterviewQuestion>(unknown).is_err());
    }

    #[tokio::test]
    async fn test_generate_without_llm_uses_defaults() {
        let qs = generate_questions(None, InterviewGoal::Quick, "entry", "ml", None).await;
        assert_eq!(qs.len(), 3);
        assert!(qs[0].question.contains("supervised"));
    }
}
