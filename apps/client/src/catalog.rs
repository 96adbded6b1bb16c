//! Static catalog content: companies, practice problems, interview tracks and
//! dashboard stats.

use crate::models::Difficulty;
use crate::routes::{InterviewTrack, Route};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub name: &'static str,
    pub question_count: u32,
    pub difficulty: Difficulty,
    pub topics: [&'static str; 3],
    pub success_rate: &'static str,
}

pub const COMPANIES: [Company; 6] = [
    Company {
        name: "Google",
        question_count: 45,
        difficulty: Difficulty::Hard,
        topics: ["Algorithms", "System Design", "Behavioral"],
        success_rate: "68%",
    },
    Company {
        name: "Meta",
        question_count: 38,
        difficulty: Difficulty::Hard,
        topics: ["Coding", "Product Design", "Leadership"],
        success_rate: "72%",
    },
    Company {
        name: "Amazon",
        question_count: 52,
        difficulty: Difficulty::Medium,
        topics: ["DSA", "Behavioral", "Leadership"],
        success_rate: "75%",
    },
    Company {
        name: "Microsoft",
        question_count: 41,
        difficulty: Difficulty::Medium,
        topics: ["Coding", "System Design", "Behavioral"],
        success_rate: "78%",
    },
    Company {
        name: "Apple",
        question_count: 33,
        difficulty: Difficulty::Hard,
        topics: ["Algorithms", "Design", "Behavioral"],
        success_rate: "70%",
    },
    Company {
        name: "Netflix",
        question_count: 28,
        difficulty: Difficulty::Hard,
        topics: ["Coding", "Culture Fit", "System Design"],
        success_rate: "65%",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemType {
    Technical,
    Behavioral,
    SystemDesign,
}

impl ProblemType {
    pub fn label(self) -> &'static str {
        match self {
            ProblemType::Technical => "Technical",
            ProblemType::Behavioral => "Behavioral",
            ProblemType::SystemDesign => "System Design",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace(' ', "-").as_str() {
            "technical" => Some(ProblemType::Technical),
            "behavioral" => Some(ProblemType::Behavioral),
            "system-design" => Some(ProblemType::SystemDesign),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Problem {
    pub id: u32,
    pub title: &'static str,
    pub difficulty: Difficulty,
    pub kind: ProblemType,
    pub category: &'static str,
    pub ai_features: [&'static str; 3],
    pub solved: bool,
    pub time_estimate: &'static str,
}

pub const PROBLEMS: [Problem; 6] = [
    Problem {
        id: 1,
        title: "Two Sum",
        difficulty: Difficulty::Easy,
        kind: ProblemType::Technical,
        category: "Arrays",
        ai_features: ["Real-time hints", "Code review", "Optimization tips"],
        solved: true,
        time_estimate: "15 min",
    },
    Problem {
        id: 2,
        title: "Tell Me About Yourself",
        difficulty: Difficulty::Easy,
        kind: ProblemType::Behavioral,
        category: "Introduction",
        ai_features: ["STAR framework", "Communication tips", "Voice analysis"],
        solved: false,
        time_estimate: "10 min",
    },
    Problem {
        id: 3,
        title: "Design a URL Shortener",
        difficulty: Difficulty::Medium,
        kind: ProblemType::SystemDesign,
        category: "Web Systems",
        ai_features: ["Architecture guidance", "Scalability tips", "Trade-off analysis"],
        solved: false,
        time_estimate: "45 min",
    },
    Problem {
        id: 4,
        title: "Binary Tree Traversal",
        difficulty: Difficulty::Medium,
        kind: ProblemType::Technical,
        category: "Trees",
        ai_features: ["Visual debugger", "Pattern recognition", "Time complexity"],
        solved: true,
        time_estimate: "25 min",
    },
    Problem {
        id: 5,
        title: "Handle Conflict at Work",
        difficulty: Difficulty::Medium,
        kind: ProblemType::Behavioral,
        category: "Leadership",
        ai_features: ["Example scenarios", "Response evaluation", "Tone analysis"],
        solved: false,
        time_estimate: "15 min",
    },
    Problem {
        id: 6,
        title: "Design Instagram",
        difficulty: Difficulty::Hard,
        kind: ProblemType::SystemDesign,
        category: "Social Media",
        ai_features: ["Component design", "Database schema", "Load balancing"],
        solved: false,
        time_estimate: "60 min",
    },
];

/// Practice filter; `None` on either axis means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemFilter {
    pub difficulty: Option<Difficulty>,
    pub kind: Option<ProblemType>,
}

impl ProblemFilter {
    /// Parses the select values used by the practice screen: `all` or a concrete value.
    pub fn from_selection(difficulty: &str, kind: &str) -> Self {
        let all = |v: &str| v.trim().eq_ignore_ascii_case("all");
        Self {
            difficulty: (!all(difficulty)).then(|| Difficulty::parse(difficulty)).flatten(),
            kind: (!all(kind)).then(|| ProblemType::parse(kind)).flatten(),
        }
    }

    pub fn matches(&self, problem: &Problem) -> bool {
        self.difficulty.map_or(true, |d| d == problem.difficulty)
            && self.kind.map_or(true, |k| k == problem.kind)
    }
}

pub fn filter_problems(filter: ProblemFilter) -> Vec<&'static Problem> {
    PROBLEMS.iter().filter(|p| filter.matches(p)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackCard {
    pub title: &'static str,
    pub description: &'static str,
    pub count: &'static str,
    pub route: Route,
}

pub const INTERVIEW_TRACKS: [TrackCard; 3] = [
    TrackCard {
        title: "Technical Interviews",
        description: "Coding problems, algorithms, data structures, and problem-solving \
                      with AI assistance",
        count: "250+ Questions",
        route: Route::Interviews(Some(InterviewTrack::Technical)),
    },
    TrackCard {
        title: "Behavioral Interviews",
        description: "STAR method, communication skills, and situational questions \
                      with AI coaching",
        count: "150+ Scenarios",
        route: Route::Interviews(Some(InterviewTrack::Behavioral)),
    },
    TrackCard {
        title: "System Design",
        description: "Architecture, scalability, and design patterns with AI-guided learning",
        count: "100+ Systems",
        route: Route::Interviews(Some(InterviewTrack::SystemDesign)),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub when: &'static str,
    pub problem: &'static str,
    pub kind: ProblemType,
    pub status: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillProgress {
    pub skill: &'static str,
    pub percent: u8,
    pub problems: u32,
}

pub const HEADLINE_STATS: [(&str, &str); 4] = [
    ("Total Problems", "127"),
    ("Problems Solved", "45"),
    ("Current Streak", "12 days"),
    ("Total Time", "34h"),
];

pub const RECENT_ACTIVITY: [Activity; 4] = [
    Activity {
        when: "2 hours ago",
        problem: "Binary Tree Inorder",
        kind: ProblemType::Technical,
        status: "Completed",
    },
    Activity {
        when: "1 day ago",
        problem: "Tell me about a challenge",
        kind: ProblemType::Behavioral,
        status: "Completed",
    },
    Activity {
        when: "2 days ago",
        problem: "Design Twitter",
        kind: ProblemType::SystemDesign,
        status: "In Progress",
    },
    Activity {
        when: "3 days ago",
        problem: "Merge K Sorted Lists",
        kind: ProblemType::Technical,
        status: "Completed",
    },
];

pub const SKILL_PROGRESS: [SkillProgress; 4] = [
    SkillProgress {
        skill: "Data Structures",
        percent: 75,
        problems: 28,
    },
    SkillProgress {
        skill: "Algorithms",
        percent: 60,
        problems: 22,
    },
    SkillProgress {
        skill: "System Design",
        percent: 45,
        problems: 12,
    },
    SkillProgress {
        skill: "Behavioral",
        percent: 80,
        problems: 18,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_filter_returns_every_problem() {
        let filter = ProblemFilter::from_selection("all", "ALL");
        assert_eq!(filter, ProblemFilter::default());
        assert_eq!(filter_problems(filter).len(), PROBLEMS.len());
    }

    #[test]
    fn test_filters_combine() {
        let medium = filter_problems(ProblemFilter::from_selection("Medium", "all"));
        let ids: Vec<u32> = medium.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);

        let medium_design =
            filter_problems(ProblemFilter::from_selection("medium", "System Design"));
        assert_eq!(medium_design.len(), 1);
        assert_eq!(medium_design[0].title, "Design a URL Shortener");

        let none = filter_problems(ProblemFilter::from_selection("hard", "behavioral"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_track_cards_link_to_subroutes() {
        for card in INTERVIEW_TRACKS {
            assert!(card.route.path().starts_with("/interviews/"));
        }
    }
}
