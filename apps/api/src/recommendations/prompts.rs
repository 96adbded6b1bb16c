use crate::models::resume::ParsedResume;

/// Replace `{resume_summary}` before sending.
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"You are an expert career counselor and technical recruiter. Analyze the following resume data and provide recommendations.

{resume_summary}

Return a JSON object:
{
  "goal": "Full Technical Interview" | "Focused Practice" | "Quick Mock",
  "target_level": "Entry Level" | "Mid Level" | "Senior Level",
  "domain": "primary technical domain, e.g. 'Full Stack Development', 'Data Science', 'DevOps'",
  "reasoning": {
    "goal_reason": "brief explanation",
    "level_reason": "brief explanation",
    "domain_reason": "brief explanation"
  }
}

RULES:
1. goal: "Full Technical Interview" for 2+ years of experience or multiple projects;
   "Focused Practice" for 0-2 years or specific skill gaps;
   "Quick Mock" for freshers and students with limited experience.
2. target_level: "Entry Level" for 0-2 years, recent graduates and students;
   "Mid Level" for 2-5 years with diverse skills; "Senior Level" for 5+ years or leadership.
3. domain: the PRIMARY technical domain from skills and experience, in standard industry terms."#;

pub fn resume_summary(resume: &ParsedResume) -> String {
    let skills: Vec<&str> = resume.skills.iter().take(20).map(String::as_str).collect();
    let certifications: Vec<&str> = resume
        .certifications
        .iter()
        .take(5)
        .map(String::as_str)
        .collect();
    let experience = serde_json::to_string_pretty(
        &resume.experience.iter().take(3).collect::<Vec<_>>(),
    )
    .unwrap_or_default();
    let education = serde_json::to_string_pretty(&resume.education).unwrap_or_default();
    let projects = serde_json::to_string_pretty(&resume.projects.iter().take(2).collect::<Vec<_>>())
        .unwrap_or_default();

    format!(
        "Resume Data:\n\
         - Name: {}\n\
         - Email: {}\n\
         - Years of experience: {}\n\
         - Skills: {}\n\
         - Experience: {}\n\
         - Education: {}\n\
         - Projects: {}\n\
         - Certifications: {}\n",
        resume.full_name.as_deref().unwrap_or("N/A"),
        resume.email.as_deref().unwrap_or("N/A"),
        resume
            .years_of_experience
            .map(|y| y.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        skills.join(", "),
        experience,
        education,
        projects,
        certifications.join(", "),
    )
}
