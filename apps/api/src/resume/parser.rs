//! Heuristic resume parser: regexes and keyword lists, no network calls.
//!
//! This is the baseline every upload gets. `enrich` may later overwrite fields
//! with an LLM extraction, but never removes what this pass found unless the
//! LLM supplied a replacement.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{EducationItem, ExperienceItem, ParsedResume};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PHONE_RES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"\+?1?\s*\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid phone regex"),
        Regex::new(r"\+?\d{1,3}[-.\s]?\d{3,4}[-.\s]?\d{4}").expect("valid phone regex"),
    ]
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
    )
    .expect("valid url regex")
});

static DEGREE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)\b(?:Bachelors?|Masters?|Doctorate|PhD|B\.S\.|M\.S\.|B\.A\.|M\.A\.|B\.Tech|M\.Tech|MBA).*$",
    )
    .expect("valid degree regex")
});

/// Skills recognised by case-insensitive substring match.
pub const KNOWN_SKILLS: &[&str] = &[
    "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "Ruby", "PHP", "Swift", "Kotlin",
    "React", "Angular", "Vue", "Node.js", "Express", "Django", "Flask", "Spring", "Laravel",
    "HTML", "CSS", "SASS", "Tailwind", "Bootstrap",
    "SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis", "Firebase",
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "Git", "GitHub", "GitLab",
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Pandas", "NumPy",
    "REST API", "GraphQL", "Microservices", "Agile", "Scrum",
];

const ROLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "designer",
    "intern",
];

const MAX_EXPERIENCE_ENTRIES: usize = 5;

/// Parses extracted resume text into structured fields.
pub fn parse_resume(raw_text: &str, file_name: &str) -> ParsedResume {
    let (linkedin, github, website) = extract_links(raw_text);

    ParsedResume {
        full_name: extract_name(raw_text),
        email: extract_email(raw_text),
        phone: extract_phone(raw_text),
        linkedin,
        github,
        website,
        skills: extract_skills(raw_text),
        education: extract_education(raw_text),
        experience: extract_experience(raw_text),
        raw_text: Some(raw_text.to_string()),
        file_name: Some(file_name.to_string()),
        ..Default::default()
    }
}

/// The first non-blank line is taken as the candidate's name.
pub fn extract_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
}

/// Returns `(linkedin, github, website)`. LinkedIn and GitHub take the last
/// matching URL; website is the first URL that is neither.
pub fn extract_links(text: &str) -> (Option<String>, Option<String>, Option<String>) {
    let mut linkedin = None;
    let mut github = None;
    let mut website = None;

    for url in URL_RE.find_iter(text).map(|m| m.as_str()) {
        let lower = url.to_lowercase();
        if lower.contains("linkedin.com") {
            linkedin = Some(url.to_string());
        } else if lower.contains("github.com") {
            github = Some(url.to_string());
        } else if website.is_none() {
            website = Some(url.to_string());
        }
    }

    (linkedin, github, website)
}

pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    KNOWN_SKILLS
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

pub fn extract_education(text: &str) -> Vec<EducationItem> {
    let mut seen = Vec::<String>::new();
    for m in DEGREE_RE.find_iter(text) {
        let degree = m.as_str().trim().to_string();
        if !degree.is_empty() && !seen.contains(&degree) {
            seen.push(degree);
        }
    }
    seen.into_iter()
        .map(|degree| EducationItem {
            degree,
            ..Default::default()
        })
        .collect()
}

/// Lines mentioning a role keyword become entries; the following line is the description.
pub fn extract_experience(text: &str) -> Vec<ExperienceItem> {
    let lines: Vec<&str> = text.lines().collect();

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let lower = line.to_lowercase();
            ROLE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .take(MAX_EXPERIENCE_ENTRIES)
        .map(|(i, line)| ExperienceItem {
            title: line.trim().to_string(),
            description: lines
                .get(i + 1)
                .map(|next| next.trim().to_string())
                .unwrap_or_default(),
            ..Default::default()
        })
        .collect()
}
