//! Post-interview results screen. The score is simulated; the insights and skill
//! breakdown are fixed.

use rand::Rng;

use crate::models::{ChatMessage, InterviewRecord, Speaker};
use crate::routes::{Mount, Route};
use crate::storage::{load, LocalStorage, LAST_INTERVIEW_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Strength,
    Improvement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: &'static str,
}

pub const INSIGHTS: [Insight; 4] = [
    Insight {
        kind: InsightKind::Strength,
        title: "Clear Communication",
        description: "You articulated your thoughts clearly and provided structured answers \
                      with concrete examples.",
    },
    Insight {
        kind: InsightKind::Improvement,
        title: "Technical Depth",
        description: "Consider diving deeper into implementation details when discussing \
                      technical solutions.",
    },
    Insight {
        kind: InsightKind::Strength,
        title: "Problem-Solving Approach",
        description: "Excellent systematic approach to breaking down complex problems \
                      into manageable parts.",
    },
    Insight {
        kind: InsightKind::Improvement,
        title: "Time Management",
        description: "Spend less time on introductory parts and more on the core \
                      technical discussion.",
    },
];

pub const SKILL_BREAKDOWN: [(&str, u8); 5] = [
    ("Communication", 92),
    ("Technical Knowledge", 85),
    ("Problem Solving", 88),
    ("Code Quality", 78),
    ("Time Management", 81),
];

pub fn rating_label(score: u8) -> &'static str {
    match score {
        90.. => "Excellent Performance!",
        80..=89 => "Very Good!",
        70..=79 => "Good Job!",
        _ => "Keep Practicing!",
    }
}

/// `"M min S sec"`.
pub fn format_duration(secs: u64) -> String {
    format!("{} min {} sec", secs / 60, secs % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub responses: usize,
    /// Whole seconds per response; 0 when the candidate never answered.
    pub avg_response_secs: u64,
}

impl Metrics {
    pub fn from_record(record: &InterviewRecord) -> Self {
        let responses = record
            .chat_messages
            .iter()
            .filter(|m| m.speaker == Speaker::User)
            .count();
        let avg_response_secs = match responses {
            0 => 0,
            n => record.duration / n as u64,
        };
        Self {
            responses,
            avg_response_secs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterviewResults {
    pub record: InterviewRecord,
    pub score: u8,
}

impl InterviewResults {
    /// Reads `lastInterview`; without one the screen redirects to `/profile`.
    pub fn mount(storage: &dyn LocalStorage) -> Mount<Self> {
        Self::mount_with_rng(storage, &mut rand::thread_rng())
    }

    pub fn mount_with_rng<R: Rng + ?Sized>(storage: &dyn LocalStorage, rng: &mut R) -> Mount<Self> {
        match load::<InterviewRecord>(storage, LAST_INTERVIEW_KEY) {
            Some(record) => Mount::Ready(Self {
                record,
                score: rng.gen_range(70..=99),
            }),
            None => Mount::Redirect(Route::Profile),
        }
    }

    pub fn rating(&self) -> &'static str {
        rating_label(self.score)
    }

    /// Filled stars out of five.
    pub fn stars(&self) -> u8 {
        self.score / 20
    }

    pub fn score_out_of_ten(&self) -> u8 {
        self.score / 10
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_record(&self.record)
    }

    pub fn duration_display(&self) -> String {
        format_duration(self.record.duration)
    }

    /// Interviewer messages in order.
    pub fn timeline(&self) -> Vec<&ChatMessage> {
        self.record
            .chat_messages
            .iter()
            .filter(|m| m.speaker == Speaker::Ai)
            .collect()
    }

    pub fn insights(&self) -> &'static [Insight] {
        &INSIGHTS
    }

    pub fn skill_breakdown(&self) -> &'static [(&'static str, u8)] {
        &SKILL_BREAKDOWN
    }
}

/// Follow-up actions offered on the results screen.
pub const ACTIONS: [(&str, Route); 3] = [
    ("Start New Interview", Route::InterviewSetup),
    ("View Analytics", Route::Stats),
    ("Back to Home", Route::Home),
];
