use crate::models::resume::ParsedResume;

/// Replace `{count}`, `{goal}`, `{level}`, `{domain}` and `{resume_context}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are an expert technical interviewer. Generate {count} interview questions for this candidate.

Interview configuration:
- Goal: {goal}
- Target level: {level}
- Domain: {domain}
{resume_context}
Generate EXACTLY {count} questions that:
1. Match the target level difficulty ({level})
2. Focus on the {domain} domain
3. Consider the candidate's skills and experience
4. Progress from easier to harder questions
5. Mix conceptual questions, coding problems and scenario-based questions

Return a JSON array:
[
  {
    "question": "Question text",
    "type": "conceptual" | "coding" | "scenario",
    "difficulty": "easy" | "medium" | "hard",
    "topics": ["topic1", "topic2"],
    "expected_answer_points": ["key point 1", "key point 2", "key point 3"]
  }
]"#;

/// Candidate profile block for the prompt: top skills, strengths, recent projects.
pub fn resume_context(resume: &ParsedResume) -> String {
    let skills: Vec<&str> = resume.skills.iter().take(10).map(String::as_str).collect();
    let projects: Vec<&str> = resume
        .projects
        .iter()
        .take(2)
        .map(|p| p.name.as_str())
        .collect();

    format!(
        "\nCandidate profile:\n\
         - Name: {}\n\
         - Experience: {} years\n\
         - Skills: {}\n\
         - Key strengths: {}\n\
         - Recent projects: {}\n",
        resume.full_name.as_deref().unwrap_or("N/A"),
        resume.years_of_experience.unwrap_or(0),
        skills.join(", "),
        resume.key_strengths.join(", "),
        projects.join(", "),
    )
}
