//! Records persisted in local storage and exchanged with the backend.
//!
//! Client-owned records keep camelCase keys; `ResumeData` is backend-owned and
//! stays snake_case.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    Technical,
    Behavioral,
    SystemDesign,
    Frontend,
    Backend,
    Ml,
}

impl InterviewType {
    pub const ALL: [InterviewType; 6] = [
        InterviewType::Technical,
        InterviewType::Behavioral,
        InterviewType::SystemDesign,
        InterviewType::Frontend,
        InterviewType::Backend,
        InterviewType::Ml,
    ];

    pub fn id(self) -> &'static str {
        match self {
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::SystemDesign => "system-design",
            InterviewType::Frontend => "frontend",
            InterviewType::Backend => "backend",
            InterviewType::Ml => "ml",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InterviewType::Technical => "Technical Coding",
            InterviewType::Behavioral => "Behavioral",
            InterviewType::SystemDesign => "System Design",
            InterviewType::Frontend => "Frontend Round",
            InterviewType::Backend => "Backend Round",
            InterviewType::Ml => "ML/AI Round",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            InterviewType::Technical => "Algorithms, data structures, problem solving",
            InterviewType::Behavioral => "STAR method, communication, experience",
            InterviewType::SystemDesign => "Architecture, scalability, trade-offs",
            InterviewType::Frontend => "React, CSS, JavaScript, UI/UX",
            InterviewType::Backend => "APIs, databases, server architecture",
            InterviewType::Ml => "Models, algorithms, data pipelines",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStructure {
    Google,
    Meta,
    Amazon,
    Microsoft,
    Startup,
    Custom,
}

impl InterviewStructure {
    pub const ALL: [InterviewStructure; 6] = [
        InterviewStructure::Google,
        InterviewStructure::Meta,
        InterviewStructure::Amazon,
        InterviewStructure::Microsoft,
        InterviewStructure::Startup,
        InterviewStructure::Custom,
    ];

    pub fn id(self) -> &'static str {
        match self {
            InterviewStructure::Google => "google",
            InterviewStructure::Meta => "meta",
            InterviewStructure::Amazon => "amazon",
            InterviewStructure::Microsoft => "microsoft",
            InterviewStructure::Startup => "startup",
            InterviewStructure::Custom => "custom",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InterviewStructure::Google => "Google Style",
            InterviewStructure::Meta => "Meta Style",
            InterviewStructure::Amazon => "Amazon Style",
            InterviewStructure::Microsoft => "Microsoft Style",
            InterviewStructure::Startup => "Startup Style",
            InterviewStructure::Custom => "Custom Structure",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            InterviewStructure::Google => "Focus on algorithms, system design, and Googleyness",
            InterviewStructure::Meta => "Behavioral, coding, and system design balanced",
            InterviewStructure::Amazon => "Leadership principles and bar raiser approach",
            InterviewStructure::Microsoft => "Technical depth with collaboration focus",
            InterviewStructure::Startup => "Practical skills, culture fit, quick decision",
            InterviewStructure::Custom => "Create your own interview flow",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

/// Written by the setup wizard under `interviewConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewConfig {
    pub domain: String,
    #[serde(default)]
    pub job_description: String,
    pub interview_type: InterviewType,
    pub structure: InterviewStructure,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Ai,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub speaker: Speaker,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn ai(message: impl Into<String>) -> Self {
        Self::new(Speaker::Ai, message)
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(Speaker::User, message)
    }

    fn new(speaker: Speaker, message: impl Into<String>) -> Self {
        Self {
            speaker,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Snapshot written under `lastInterview` when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub config: InterviewConfig,
    /// Elapsed seconds.
    pub duration: u64,
    pub chat_messages: Vec<ChatMessage>,
    pub code: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub is_authenticated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceItem {
    pub title: String,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationItem {
    pub degree: String,
    pub institution: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectItem {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

/// Parsed resume as produced by the backend and cached under `resumeData`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub id: Option<i64>,
    pub user: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub projects: Vec<ProjectItem>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub years_of_experience: Option<i32>,
    pub key_strengths: Vec<String>,
    pub raw_text: Option<String>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
