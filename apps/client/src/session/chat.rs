//! Scripted interviewer chat.
//!
//! User messages are appended immediately. Replies come from a single worker
//! task that handles sends in arrival order, each no earlier than two seconds
//! after its message, and picks the next question only when the reply is due.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::models::{ChatMessage, Speaker};

pub const GREETING_DELAY: Duration = Duration::from_secs(1);
pub const REPLY_DELAY: Duration = Duration::from_secs(2);

pub const GREETING_PREFIX: &str =
    "Hello! I'm your AI interviewer. Let's begin with an introduction. ";
pub const FOLLOW_UP_PREFIX: &str = "Great answer! Let me ask you this: ";
pub const CLOSING_MESSAGE: &str =
    "Thank you for your responses! Feel free to ask me any questions you have.";

pub const DEFAULT_QUESTIONS: [&str; 5] = [
    "Tell me about yourself and your experience with software development.",
    "What's your approach to solving complex problems?",
    "Can you explain a challenging project you worked on?",
    "How do you handle tight deadlines and pressure?",
    "Where do you see yourself in 5 years?",
];

pub fn default_questions() -> Vec<String> {
    DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect()
}

type Transcript = Arc<Mutex<Vec<ChatMessage>>>;

fn lock(transcript: &Transcript) -> MutexGuard<'_, Vec<ChatMessage>> {
    // Poisoning only follows a panic mid-push; the Vec is still valid.
    transcript.lock().unwrap_or_else(|e| e.into_inner())
}

/// Walks the question list. The greeting uses question 0; each reply after that
/// takes the next question until they run out.
struct Script {
    questions: Vec<String>,
    next: usize,
}

impl Script {
    fn greeting(&self) -> String {
        format!("{GREETING_PREFIX}{}", self.questions[0])
    }

    fn reply(&mut self) -> String {
        match self.questions.get(self.next) {
            Some(question) => {
                self.next += 1;
                format!("{FOLLOW_UP_PREFIX}{question}")
            }
            None => CLOSING_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct InterviewerChat {
    transcript: Transcript,
    pending: mpsc::UnboundedSender<Instant>,
    worker: JoinHandle<()>,
}

impl InterviewerChat {
    /// Starts the interviewer. An empty question list uses the default questions.
    /// Must be called from within a tokio runtime.
    pub fn start(questions: Vec<String>) -> Self {
        let questions = if questions.is_empty() {
            default_questions()
        } else {
            questions
        };

        let transcript: Transcript = Arc::default();
        let (pending, mut due) = mpsc::unbounded_channel::<Instant>();
        let greet_at = Instant::now() + GREETING_DELAY;

        let log = Arc::clone(&transcript);
        let worker = tokio::spawn(async move {
            let mut script = Script { questions, next: 1 };

            sleep_until(greet_at).await;
            lock(&log).push(ChatMessage::ai(script.greeting()));

            while let Some(reply_at) = due.recv().await {
                sleep_until(reply_at).await;
                let reply = script.reply();
                debug!(question = script.next, "interviewer replied");
                lock(&log).push(ChatMessage::ai(reply));
            }
        });

        Self {
            transcript,
            pending,
            worker,
        }
    }

    /// Appends the user's message and schedules one reply. Blank input is ignored
    /// and returns `false`.
    pub fn send(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        lock(&self.transcript).push(ChatMessage::user(text));
        // The receiver only goes away once the worker is stopped; the reply is
        // dropped with it.
        let _ = self.pending.send(Instant::now() + REPLY_DELAY);
        true
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.transcript).clone()
    }

    /// Line shown under the interviewer's avatar.
    pub fn subtitle(&self) -> String {
        subtitle_for(&lock(&self.transcript))
    }

    /// Cancels the greeting and every pending reply.
    pub fn stop(&self) {
        self.worker.abort();
    }
}

impl Drop for InterviewerChat {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

pub fn subtitle_for(messages: &[ChatMessage]) -> String {
    match messages.last() {
        Some(m) if m.speaker == Speaker::Ai => m.message.clone(),
        Some(_) => "Listening to your response...".to_string(),
        None => "Waiting for interview to start...".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn texts(chat: &InterviewerChat) -> Vec<(Speaker, String)> {
        chat.messages()
            .into_iter()
            .map(|m| (m.speaker, m.message))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_greets_after_one_second() {
        let chat = InterviewerChat::start(Vec::new());
        assert_eq!(chat.subtitle(), "Waiting for interview to start...");

        sleep(Duration::from_millis(900)).await;
        assert!(chat.messages().is_empty());

        sleep(Duration::from_millis(200)).await;
        let messages = chat.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].message,
            format!("{GREETING_PREFIX}{}", DEFAULT_QUESTIONS[0])
        );
        assert_eq!(chat.subtitle(), messages[0].message);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_send_gets_one_reply_two_seconds_later() {
        let chat = InterviewerChat::start(vec!["Q0".into(), "Q1".into()]);
        sleep(Duration::from_millis(1100)).await;

        assert!(chat.send("my answer"));
        assert_eq!(chat.subtitle(), "Listening to your response...");

        sleep(Duration::from_millis(1900)).await;
        assert_eq!(chat.messages().len(), 2);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(
            texts(&chat),
            vec![
                (Speaker::Ai, format!("{GREETING_PREFIX}Q0")),
                (Speaker::User, "my answer".to_string()),
                (Speaker::Ai, format!("{FOLLOW_UP_PREFIX}Q1")),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_sends_reply_in_order_then_close() {
        let chat = InterviewerChat::start(vec!["Q0".into(), "Q1".into(), "Q2".into()]);
        sleep(Duration::from_millis(1100)).await;

        for answer in ["a", "b", "c", "d"] {
            assert!(chat.send(answer));
            sleep(Duration::from_millis(100)).await;
        }
        sleep(Duration::from_secs(3)).await;

        let replies: Vec<String> = chat
            .messages()
            .into_iter()
            .skip(1)
            .filter(|m| m.speaker == Speaker::Ai)
            .map(|m| m.message)
            .collect();
        assert_eq!(
            replies,
            vec![
                format!("{FOLLOW_UP_PREFIX}Q1"),
                format!("{FOLLOW_UP_PREFIX}Q2"),
                CLOSING_MESSAGE.to_string(),
                CLOSING_MESSAGE.to_string(),
            ]
        );
        let users = chat
            .messages()
            .iter()
            .filter(|m| m.speaker == Speaker::User)
            .count();
        assert_eq!(users, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_before_greeting_keeps_arrival_order() {
        let chat = InterviewerChat::start(vec!["Q0".into(), "Q1".into()]);
        sleep(Duration::from_millis(500)).await;
        assert!(chat.send("hello?"));

        sleep(Duration::from_millis(700)).await;
        let messages = chat.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].speaker, Speaker::User);
        assert_eq!(messages[1].message, format!("{GREETING_PREFIX}Q0"));

        // The reply is due two seconds after the send, not after the greeting.
        sleep(Duration::from_millis(1400)).await;
        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].speaker, Speaker::Ai);
        assert_eq!(messages[2].message, format!("{FOLLOW_UP_PREFIX}Q1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_messages_are_ignored() {
        let chat = InterviewerChat::start(Vec::new());
        sleep(Duration::from_millis(1100)).await;
        assert!(!chat.send("   "));
        assert!(!chat.send(""));
        sleep(Duration::from_secs(5)).await;
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_pending_replies() {
        let chat = InterviewerChat::start(Vec::new());
        sleep(Duration::from_millis(1100)).await;
        chat.send("answer");
        chat.stop();
        sleep(Duration::from_secs(5)).await;

        let messages = chat.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].speaker, Speaker::User);
    }
}
