//! Resume upload flow (backend mode).

use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};

use crate::api::{ApiClient, ProgressFn};
use crate::models::User;
use crate::routes::{Mount, Route};
use crate::storage::{load, save, LocalStorage, RESUME_DATA_KEY, USER_KEY};

pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
pub const GENERIC_FAILURE: &str = "Failed to analyze resume. Please try again.";

#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content: Bytes,
}

/// A failed upload: the banner to show, and where to go if the screen should leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub banner: String,
    pub redirect: Option<Route>,
}

impl UploadFailure {
    fn banner(message: impl Into<String>) -> Self {
        Self {
            banner: message.into(),
            redirect: None,
        }
    }
}

fn is_pdf(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Overall progress for a file upload: 30 % once the request is built, the
/// remaining 70 % spread over the bytes sent.
pub fn transfer_progress(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let share = (sent.min(total) * 70 + total / 2) / total;
    30 + share as u8
}

#[derive(Debug)]
pub struct ResumeUpload {
    user: User,
    file: Option<SelectedFile>,
    progress: Arc<AtomicU8>,
    error: Option<String>,
}

impl ResumeUpload {
    pub fn mount(storage: &dyn LocalStorage) -> Mount<Self> {
        match load::<User>(storage, USER_KEY) {
            Some(user) => Mount::Ready(Self {
                user,
                file: None,
                progress: Arc::new(AtomicU8::new(0)),
                error: None,
            }),
            None => Mount::Redirect(Route::Login),
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress.load(Ordering::Relaxed)
    }

    /// Shared handle for displaying progress while `upload` runs.
    pub fn progress_handle(&self) -> Arc<AtomicU8> {
        Arc::clone(&self.progress)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// PDF files up to 10 MiB only. A rejected file leaves the previous choice in place.
    pub fn select_file(&mut self, name: &str, content: Bytes) -> Result<(), String> {
        self.error = None;
        let rejection = if !is_pdf(name) {
            Some("Please upload a PDF file only")
        } else if content.len() > MAX_RESUME_BYTES {
            Some("File size must be less than 10MB")
        } else {
            None
        };
        if let Some(message) = rejection {
            self.error = Some(message.to_string());
            return Err(message.to_string());
        }

        self.file = Some(SelectedFile {
            name: name.to_string(),
            content,
        });
        Ok(())
    }

    /// Sends the selected file, caches the parsed resume under `resumeData` and
    /// returns the profile route.
    pub async fn upload(
        &mut self,
        api: &ApiClient,
        storage: &dyn LocalStorage,
    ) -> Result<Route, UploadFailure> {
        let result = self.try_upload(api, storage).await;
        if let Err(failure) = &result {
            self.error = Some(failure.banner.clone());
        }
        result
    }

    async fn try_upload(
        &mut self,
        api: &ApiClient,
        storage: &dyn LocalStorage,
    ) -> Result<Route, UploadFailure> {
        let file = self
            .file
            .clone()
            .ok_or_else(|| UploadFailure::banner("Please select a resume file first"))?;
        let Some(uid) = self.user.uid.clone() else {
            return Err(UploadFailure {
                banner: "User not authenticated".to_string(),
                redirect: Some(Route::Login),
            });
        };

        self.error = None;
        // 10 while the request is prepared; the first stream report moves it to 30.
        self.progress.store(10, Ordering::Relaxed);

        let progress = Arc::clone(&self.progress);
        let report: ProgressFn = Arc::new(move |sent, total| {
            progress.store(transfer_progress(sent, total), Ordering::Relaxed);
        });

        match api
            .upload_resume(&uid, &file.name, file.content, Some(report))
            .await
        {
            Ok(uploaded) => {
                self.progress.store(100, Ordering::Relaxed);
                info!("{}", uploaded.message);
                save(storage, RESUME_DATA_KEY, &uploaded.resume)
                    .map_err(|e| UploadFailure::banner(format!("Could not save resume: {e}")))?;
                Ok(Route::Profile)
            }
            Err(e) => {
                error!("Upload error: {e}");
                self.progress.store(0, Ordering::Relaxed);
                Err(UploadFailure::banner(
                    e.server_message().unwrap_or(GENERIC_FAILURE),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::respond_once;
    use crate::models::ResumeData;
    use crate::storage::MemoryStorage;

    fn storage_with_user(uid: Option<&str>) -> MemoryStorage {
        let storage = MemoryStorage::new();
        let user = User {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            uid: uid.map(str::to_string),
            is_authenticated: true,
        };
        save(&storage, USER_KEY, &user).unwrap();
        storage
    }

    fn pdf() -> Bytes {
        Bytes::from_static(b"%PDF-1.4 fake")
    }

    #[test]
    fn test_requires_logged_in_user() {
        let storage = MemoryStorage::new();
        assert_eq!(
            ResumeUpload::mount(&storage).redirect_target(),
            Some(Route::Login)
        );
    }

    #[test]
    fn test_rejects_non_pdf_and_oversized_files() {
        let storage = storage_with_user(Some("u-1"));
        let mut flow = ResumeUpload::mount(&storage).ready().unwrap();

        assert_eq!(
            flow.select_file("cv.docx", pdf()),
            Err("Please upload a PDF file only".to_string())
        );
        let huge = Bytes::from(vec![0u8; MAX_RESUME_BYTES + 1]);
        assert_eq!(
            flow.select_file("cv.pdf", huge),
            Err("File size must be less than 10MB".to_string())
        );
        assert!(flow.file().is_none());

        flow.select_file("CV.PDF", pdf()).unwrap();
        assert_eq!(flow.file().unwrap().name, "CV.PDF");
        assert_eq!(flow.error(), None);
    }

    #[test]
    fn test_transfer_progress_spans_thirty_to_hundred() {
        assert_eq!(transfer_progress(0, 100), 30);
        assert_eq!(transfer_progress(50, 100), 65);
        assert_eq!(transfer_progress(100, 100), 100);
        assert_eq!(transfer_progress(0, 0), 100);
    }

    #[tokio::test]
    async fn test_upload_without_file_or_uid() {
        let api = ApiClient::new("http://127.0.0.1:1/api").unwrap();

        let storage = storage_with_user(Some("u-1"));
        let mut flow = ResumeUpload::mount(&storage).ready().unwrap();
        let failure = flow.upload(&api, &storage).await.unwrap_err();
        assert_eq!(failure.banner, "Please select a resume file first");
        assert_eq!(failure.redirect, None);

        let storage = storage_with_user(None);
        let mut flow = ResumeUpload::mount(&storage).ready().unwrap();
        flow.select_file("cv.pdf", pdf()).unwrap();
        let failure = flow.upload(&api, &storage).await.unwrap_err();
        assert_eq!(failure.redirect, Some(Route::Login));
        assert_eq!(flow.error(), Some("User not authenticated"));
    }

    #[tokio::test]
    async fn test_successful_upload_caches_resume() {
        let (base, _request) = respond_once(
            201,
            r#"{"message":"Resume analyzed and data saved successfully","resume":{"id":3,"full_name":"Ada"}}"#,
        )
        .await;
        let api = ApiClient::new(&base).unwrap();
        let storage = storage_with_user(Some("u-1"));
        let mut flow = ResumeUpload::mount(&storage).ready().unwrap();
        flow.select_file("cv.pdf", pdf()).unwrap();

        assert_eq!(flow.upload(&api, &storage).await.unwrap(), Route::Profile);
        assert_eq!(flow.progress(), 100);
        let cached: ResumeData = load(&storage, RESUME_DATA_KEY).unwrap();
        assert_eq!(cached.full_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_server_message_becomes_banner() {
        let (base, _request) = respond_once(
            404,
            r#"{"error":{"code":"NOT_FOUND","message":"User profile not found"}}"#,
        )
        .await;
        let api = ApiClient::new(&base).unwrap();
        let storage = storage_with_user(Some("u-1"));
        let mut flow = ResumeUpload::mount(&storage).ready().unwrap();
        flow.select_file("cv.pdf", pdf()).unwrap();

        let failure = flow.upload(&api, &storage).await.unwrap_err();
        assert_eq!(failure.banner, "User profile not found");
        assert!(storage.get_item(RESUME_DATA_KEY).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_uses_generic_banner() {
        let api = ApiClient::new("http://127.0.0.1:1/api").unwrap();
        let storage = storage_with_user(Some("u-1"));
        let mut flow = ResumeUpload::mount(&storage).ready().unwrap();
        flow.select_file("cv.pdf", pdf()).unwrap();

        let failure = flow.upload(&api, &storage).await.unwrap_err();
        assert_eq!(failure.banner, GENERIC_FAILURE);
    }
}
