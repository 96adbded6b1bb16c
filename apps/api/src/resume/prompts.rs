/// Resume extraction prompt. Replace `{email_hint}` and `{resume_text}` before sending.
pub const RESUME_EXTRACT_PROMPT: &str = r#"You are an expert resume parser. Extract ALL information from the resume below.

Return a JSON object with this EXACT schema:
{
  "full_name": "candidate's full name (First Last)",
  "email": "email address from the resume, or {email_hint}",
  "phone": "phone number",
  "location": "city, country",
  "linkedin": "LinkedIn URL if present",
  "github": "GitHub URL if present",
  "website": "personal website URL if present",
  "summary": "2-3 sentence professional summary",
  "years_of_experience": 0,
  "skills": ["skill1", "skill2"],
  "education": [
    {"degree": "full degree name", "institution": "university", "year": "graduation year"}
  ],
  "experience": [
    {"title": "job title", "company": "organization", "duration": "Jan 2023 - Present", "description": "key responsibilities and achievements"}
  ],
  "projects": [
    {"name": "project name", "description": "what it does and your role", "technologies": ["tech1"]}
  ],
  "certifications": ["certification"],
  "languages": ["English"],
  "key_strengths": ["strength 1", "strength 2", "strength 3"]
}

RULES:
- full_name is the person's name, never a job title or skill.
- Write a summary if none is stated.
- years_of_experience is computed from work history (0 for students).
- skills lists ALL technical skills, tools, languages and frameworks.
- experience includes internships, jobs, volunteer work and leadership roles.
- key_strengths lists the top 3-5 strengths.
- Use null for anything not present.

Resume text:
{resume_text}"#;
