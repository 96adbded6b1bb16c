//! The live interview screen: clock, chat, code buffer and whiteboard.

pub mod chat;
pub mod clock;
pub mod whiteboard;

use chrono::Utc;
use tracing::info;

use crate::models::{ChatMessage, InterviewConfig, InterviewRecord};
use crate::routes::{Mount, Route};
use crate::storage::{
    load, save, LocalStorage, StorageError, INTERVIEW_CONFIG_KEY, LAST_INTERVIEW_KEY,
};

use self::chat::InterviewerChat;
use self::clock::SessionClock;
use self::whiteboard::Whiteboard;

pub const INITIAL_CODE: &str = "// Write your code here...\n\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Code,
    Whiteboard,
}

#[derive(Debug)]
pub struct InterviewSession {
    config: InterviewConfig,
    clock: SessionClock,
    chat: InterviewerChat,
    pub code: String,
    pub whiteboard: Whiteboard,
    pub tab: Tab,
    pub recording: bool,
    pub video_on: bool,
}

impl InterviewSession {
    /// Loads `interviewConfig` and starts the clock and interviewer. Without a
    /// readable config the screen redirects to setup. An empty `questions` list
    /// uses the default questions.
    pub fn mount(storage: &dyn LocalStorage, questions: Vec<String>) -> Mount<Self> {
        let Some(config) = load::<InterviewConfig>(storage, INTERVIEW_CONFIG_KEY) else {
            info!("No interview configured, redirecting to setup");
            return Mount::Redirect(Route::InterviewSetup);
        };

        Mount::Ready(Self {
            config,
            clock: SessionClock::start(),
            chat: InterviewerChat::start(questions),
            code: INITIAL_CODE.to_string(),
            whiteboard: Whiteboard::new(),
            tab: Tab::default(),
            recording: false,
            video_on: false,
        })
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    /// e.g. `TECHNICAL Interview`.
    pub fn title(&self) -> String {
        format!("{} Interview", self.config.interview_type.id().to_uppercase())
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.elapsed_secs()
    }

    pub fn clock_display(&self) -> String {
        self.clock.display()
    }

    pub fn send(&self, text: &str) -> bool {
        self.chat.send(text)
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.chat.messages()
    }

    pub fn subtitle(&self) -> String {
        self.chat.subtitle()
    }

    pub fn toggle_recording(&mut self) -> bool {
        self.recording = !self.recording;
        self.recording
    }

    pub fn toggle_video(&mut self) -> bool {
        self.video_on = !self.video_on;
        self.video_on
    }

    /// Stops the clock and any pending replies, saves `lastInterview` and returns
    /// the results route.
    pub fn end(self, storage: &dyn LocalStorage) -> Result<Route, StorageError> {
        self.clock.stop();
        self.chat.stop();

        let record = InterviewRecord {
            config: self.config.clone(),
            duration: self.clock.elapsed_secs(),
            chat_messages: self.chat.messages(),
            code: self.code.clone(),
            completed_at: Utc::now(),
        };
        save(storage, LAST_INTERVIEW_KEY, &record)?;
        info!(
            duration = record.duration,
            messages = record.chat_messages.len(),
            "Interview ended"
        );
        Ok(Route::InterviewResults)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;
    use crate::models::{Difficulty, InterviewStructure, InterviewType, Speaker};
    use crate::storage::MemoryStorage;

    fn configured_storage() -> MemoryStorage {
        let storage = MemoryStorage::new();
        let config = InterviewConfig {
            domain: "Software Engineering".into(),
            job_description: String::new(),
            interview_type: InterviewType::Technical,
            structure: InterviewStructure::Google,
            difficulty: Difficulty::Medium,
        };
        save(&storage, INTERVIEW_CONFIG_KEY, &config).unwrap();
        storage
    }

    #[tokio::test]
    async fn test_mount_without_config_redirects_to_setup() {
        let storage = MemoryStorage::new();
        let mount = InterviewSession::mount(&storage, Vec::new());
        assert_eq!(mount.redirect_target(), Some(Route::InterviewSetup));

        storage.set_item(INTERVIEW_CONFIG_KEY, "garbage").unwrap();
        let mount = InterviewSession::mount(&storage, Vec::new());
        assert_eq!(mount.redirect_target(), Some(Route::InterviewSetup));
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_writes_last_interview() {
        let storage = configured_storage();
        let mut session = InterviewSession::mount(&storage, Vec::new()).ready().unwrap();
        assert_eq!(session.title(), "TECHNICAL Interview");
        assert_eq!(session.code, INITIAL_CODE);

        sleep(Duration::from_millis(1500)).await;
        session.send("I build distributed systems.");
        session.code.push_str("fn main() {}\n");
        sleep(Duration::from_millis(3000)).await;

        assert_eq!(session.end(&storage).unwrap(), Route::InterviewResults);

        let record: InterviewRecord = load(&storage, LAST_INTERVIEW_KEY).unwrap();
        assert_eq!(record.duration, 4);
        assert_eq!(record.config.domain, "Software Engineering");
        assert!(record.code.ends_with("fn main() {}\n"));
        let speakers: Vec<Speaker> = record.chat_messages.iter().map(|m| m.speaker).collect();
        assert_eq!(speakers, vec![Speaker::Ai, Speaker::User, Speaker::Ai]);
    }

    #[tokio::test]
    async fn test_toggles_flip_cosmetic_flags() {
        let storage = configured_storage();
        let mut session = InterviewSession::mount(&storage, Vec::new()).ready().unwrap();
        assert!(session.toggle_recording());
        assert!(!session.toggle_recording());
        assert!(session.toggle_video());
        assert_eq!(session.tab, Tab::Code);
    }
}
