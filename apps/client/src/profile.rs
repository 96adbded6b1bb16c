//! Profile screen.

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::models::{ResumeData, User};
use crate::routes::{Mount, Route};
use crate::storage::{load, save, LocalStorage, RESUME_DATA_KEY, USER_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentInterview {
    pub kind: &'static str,
    pub company: &'static str,
    pub score: &'static str,
    pub when: &'static str,
}

pub const RECENT_INTERVIEWS: [RecentInterview; 3] = [
    RecentInterview {
        kind: "Technical",
        company: "Google",
        score: "85%",
        when: "2 days ago",
    },
    RecentInterview {
        kind: "Behavioral",
        company: "Meta",
        score: "92%",
        when: "5 days ago",
    },
    RecentInterview {
        kind: "System Design",
        company: "Amazon",
        score: "78%",
        when: "1 week ago",
    },
];

pub const QUICK_ACTIONS: [(&str, Route); 4] = [
    ("Start New Interview", Route::InterviewSetup),
    ("View Analytics", Route::Stats),
    ("Practice Problems", Route::Practice),
    ("Upload Resume", Route::ResumeUpload),
];

#[derive(Debug, Clone)]
pub struct ProfileScreen {
    pub user: User,
    pub resume: Option<ResumeData>,
}

impl ProfileScreen {
    /// Requires a `user` in storage. With an API client the cached `resumeData`
    /// is refreshed from the backend; a failed refresh keeps the cached copy.
    pub async fn mount(storage: &dyn LocalStorage, api: Option<&ApiClient>) -> Mount<Self> {
        let Some(user) = load::<User>(storage, USER_KEY) else {
            return Mount::Redirect(Route::Login);
        };

        let mut resume = load::<ResumeData>(storage, RESUME_DATA_KEY);

        if let (Some(api), Some(uid)) = (api, user.uid.as_deref()) {
            match api.get_resume(uid).await {
                Ok(fresh) => {
                    if let Err(e) = save(storage, RESUME_DATA_KEY, &fresh) {
                        warn!("Could not cache resume: {e}");
                    }
                    resume = Some(fresh);
                }
                Err(e) if e.is_not_found() => debug!("No resume uploaded yet for {uid}"),
                Err(e) => warn!("Resume refresh failed, showing cached copy: {e}"),
            }
        }

        Mount::Ready(Self { user, resume })
    }

    pub fn recent_interviews(&self) -> &'static [RecentInterview] {
        &RECENT_INTERVIEWS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::respond_once;
    use crate::storage::MemoryStorage;

    fn user(uid: Option<&str>) -> User {
        User {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            uid: uid.map(str::to_string),
            is_authenticated: true,
        }
    }

    #[tokio::test]
    async fn test_without_user_redirects_to_login() {
        let storage = MemoryStorage::new();
        let mount = ProfileScreen::mount(&storage, None).await;
        assert_eq!(mount.redirect_target(), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_local_mode_uses_cached_resume() {
        let storage = MemoryStorage::new();
        save(&storage, USER_KEY, &user(None)).unwrap();
        let cached = ResumeData {
            full_name: Some("Ada L".into()),
            ..Default::default()
        };
        save(&storage, RESUME_DATA_KEY, &cached).unwrap();

        let screen = ProfileScreen::mount(&storage, None).await.ready().unwrap();
        assert_eq!(screen.user.name, "Ada");
        assert_eq!(screen.resume, Some(cached));
    }

    #[tokio::test]
    async fn test_backend_mode_refreshes_resume_cache() {
        let (base, _request) =
            respond_once(200, r#"{"id":9,"user":"u-1","full_name":"Ada Lovelace"}"#).await;
        let api = ApiClient::new(&base).unwrap();
        let storage = MemoryStorage::new();
        save(&storage, USER_KEY, &user(Some("u-1"))).unwrap();

        let screen = ProfileScreen::mount(&storage, Some(&api))
            .await
            .ready()
            .unwrap();
        assert_eq!(
            screen.resume.unwrap().full_name.as_deref(),
            Some("Ada Lovelace")
        );
        let cached: ResumeData = load(&storage, RESUME_DATA_KEY).unwrap();
        assert_eq!(cached.id, Some(9));
    }
}
