//! Curated fallback question banks, used when no LLM is configured or it fails.

use crate::questions::{InterviewGoal, InterviewQuestion, QuestionDifficulty, QuestionKind};

fn q(
    question: &str,
    kind: QuestionKind,
    difficulty: QuestionDifficulty,
    topics: &[&str],
    points: &[&str],
) -> InterviewQuestion {
    InterviewQuestion {
        question: question.to_string(),
        kind,
        difficulty,
        topics: topics.iter().map(|s| s.to_string()).collect(),
        expected_answer_points: points.iter().map(|s| s.to_string()).collect(),
    }
}

/// The bank for a domain key (`dsa`, `web`, `ml`, `core`). Unknown keys get `dsa`.
pub fn bank(domain: &str) -> Vec<InterviewQuestion> {
    use QuestionDifficulty::*;
    use QuestionKind::*;

    match domain.trim().to_ascii_lowercase().as_str() {
        "web" => vec![
            q(
                "Explain the difference between GET and POST HTTP methods.",
                Conceptual,
                Easy,
                &["HTTP", "web fundamentals"],
                &["Data transmission", "Security", "Use cases"],
            ),
            q(
                "How would you implement authentication in a web application?",
                Scenario,
                Medium,
                &["authentication", "security"],
                &["JWT tokens", "Session management", "Security best practices"],
            ),
        ],
        "ml" => vec![
            q(
                "Explain the difference between supervised and unsupervised learning.",
                Conceptual,
                Easy,
                &["machine learning", "fundamentals"],
                &["Labeled data", "Use cases", "Examples of algorithms"],
            ),
            q(
                "How do you handle overfitting in a machine learning model?",
                Scenario,
                Medium,
                &["model training", "overfitting"],
                &["Regularization", "Cross-validation", "More training data"],
            ),
        ],
        "core" => vec![q(
            "Explain how an operating system manages memory.",
            Conceptual,
            Medium,
            &["operating systems", "memory management"],
            &["Virtual memory", "Paging", "Memory allocation"],
        )],
        _ => vec![
            q(
                "Explain the difference between an array and a linked list. \
                 When would you use each?",
                Conceptual,
                Easy,
                &["data structures", "arrays", "linked lists"],
                &["Memory allocation", "Access time", "Use cases"],
            ),
            q(
                "Implement a function to reverse a linked list.",
                Coding,
                Medium,
                &["linked lists", "algorithms"],
                &["Iterative approach", "Pointer manipulation", "Time complexity O(n)"],
            ),
            q(
                "What is the time complexity of common sorting algorithms?",
                Conceptual,
                Medium,
                &["algorithms", "complexity"],
                &["QuickSort O(n log n)", "MergeSort O(n log n)", "BubbleSort O(n²)"],
            ),
        ],
    }
}

/// Cycles the domain bank until the goal's question count is reached.
pub fn default_questions(goal: InterviewGoal, domain: &str) -> Vec<InterviewQuestion> {
    bank(domain)
        .into_iter()
        .cycle()
        .take(goal.question_count())
        .collect()
}
