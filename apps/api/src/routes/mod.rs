pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profiles::handlers as profiles;
use crate::questions::handlers as questions;
use crate::recommendations::handlers as recommendations;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/profile/create/", post(profiles::handle_create_profile))
        .route("/api/profile/", get(profiles::handle_get_profile))
        .route(
            "/api/resume/upload/",
            post(resume::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/resume/", get(resume::handle_get_resume))
        .route(
            "/api/recommendations/",
            get(recommendations::handle_get_recommendations),
        )
        .route(
            "/api/questions/generate/",
            post(questions::handle_generate_questions),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::store::MemoryProfileStore;

    const BOUNDARY: &str = "prep-test-boundary";

    fn app() -> Router {
        let state = AppState::new(Arc::new(MemoryProfileStore::new()), Config::for_tests());
        build_router(state)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn upload(uid: Option<&str>, file: Option<(&str, &str)>) -> Request<Body> {
        let mut body = String::new();
        if let Some(uid) = uid {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"uid\"\r\n\r\n{uid}\r\n"
            ));
        }
        if let Some((name, content)) = file {
            body.push_str(&format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
                 Content-Type: text/plain\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::post("/api/resume/upload/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn create_ada(app: &Router) -> Response {
        app.clone()
            .oneshot(post_json(
                "/api/profile/create/",
                json!({
                    "uid": "u-1",
                    "email": "ada@example.com",
                    "name": "Ada",
                    "phone": "555-0100"
                }),
            ))
            .await
            .unwrap()
    }

    const RESUME: &str = "Ada Lovelace\nada@example.com\n+1 555 010 0000\n\
        Skills: Python, Rust, PostgreSQL, Docker\n\
        Bachelor of Science in Mathematics\n\
        Software Engineer at Analytical Engines\n";

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "prep-api");
        assert_eq!(body["features"]["llm"], false);
    }

    #[tokio::test]
    async fn test_create_profile_is_idempotent() {
        let app = app();

        let first = create_ada(&app).await;
        assert_eq!(first.status(), StatusCode::CREATED);
        let body = body_json(first).await;
        assert_eq!(body["message"], "Profile created successfully");
        assert_eq!(body["profile"]["email"], "ada@example.com");
        assert!(body["profile"]["resume"].is_null());

        let second = create_ada(&app).await;
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(body_json(second).await["message"], "Profile already exists");
    }

    #[tokio::test]
    async fn test_create_profile_rejects_bad_email() {
        let response = app()
            .oneshot(post_json(
                "/api/profile/create/",
                json!({"uid": "u-2", "email": "not-an-email", "name": "Bob"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_get_profile_requires_uid_and_existing_user() {
        let app = app();

        let missing_uid = app.clone().oneshot(get("/api/profile/")).await.unwrap();
        assert_eq!(missing_uid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(missing_uid).await["error"]["message"], "UID is required");

        let unknown = app
            .clone()
            .oneshot(get("/api/profile/?uid=nobody"))
            .await
            .unwrap();
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        create_ada(&app).await;
        let by_header = app
            .oneshot(
                Request::get("/api/profile/")
                    .header("X-User-UID", "u-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(by_header.status(), StatusCode::OK);
        assert_eq!(body_json(by_header).await["name"], "Ada");
    }

    #[tokio::test]
    async fn test_upload_requires_profile_and_file() {
        let app = app();

        let no_profile = app
            .clone()
            .oneshot(upload(Some("u-1"), Some(("cv.txt", RESUME))))
            .await
            .unwrap();
        assert_eq!(no_profile.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(no_profile).await["error"]["message"],
            "User profile not found"
        );

        create_ada(&app).await;
        let no_file = app.clone().oneshot(upload(Some("u-1"), None)).await.unwrap();
        assert_eq!(no_file.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(no_file).await["error"]["message"], "No file uploaded");

        let no_uid = app.oneshot(upload(None, Some(("cv.txt", RESUME)))).await.unwrap();
        assert_eq!(no_uid.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_then_fetch_resume() {
        let app = app();
        create_ada(&app).await;

        let first = app
            .clone()
            .oneshot(upload(Some("u-1"), Some(("cv.txt", RESUME))))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let body = body_json(first).await;
        assert_eq!(body["message"], "Resume analyzed and data saved successfully");
        assert_eq!(body["resume"]["email"], "ada@example.com");
        assert_eq!(body["resume"]["file_name"], "cv.txt");
        let skills = body["resume"]["skills"].as_array().unwrap();
        assert!(skills.iter().any(|s| s == "Python"));

        let again = app
            .clone()
            .oneshot(upload(Some("u-1"), Some(("cv.txt", RESUME))))
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::OK);

        let fetched = app
            .clone()
            .oneshot(get("/api/resume/?uid=u-1"))
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
        assert_eq!(body_json(fetched).await["user"], "u-1");

        let profile = app.oneshot(get("/api/profile/?uid=u-1")).await.unwrap();
        assert_eq!(body_json(profile).await["resume"]["file_name"], "cv.txt");
    }

    #[tokio::test]
    async fn test_recommendations_need_a_resume() {
        let app = app();
        create_ada(&app).await;

        let before = app
            .clone()
            .oneshot(get("/api/recommendations/?uid=u-1"))
            .await
            .unwrap();
        assert_eq!(before.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(before).await["error"]["message"],
            "Resume not found. Please upload your resume first."
        );

        app.clone()
            .oneshot(upload(Some("u-1"), Some(("cv.txt", RESUME))))
            .await
            .unwrap();

        let after = app
            .oneshot(get("/api/recommendations/?uid=u-1"))
            .await
            .unwrap();
        assert_eq!(after.status(), StatusCode::OK);
        let body = body_json(after).await;
        assert_eq!(body["recommendations"]["goal"], "Focused Practice");
        assert_eq!(
            body["recommendations"]["reasoning"]["goal_reason"],
            "API key not configured"
        );
        assert!(body["resume_summary"]["skills_count"].as_u64().unwrap() >= 3);
    }

    #[tokio::test]
    async fn test_generate_questions() {
        let app = app();

        let missing = app
            .clone()
            .oneshot(post_json(
                "/api/questions/generate/",
                json!({"uid": "u-1", "goal": "quick", "level": "entry"}),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(missing).await["error"]["message"],
            "Missing required parameters (uid, goal, level, domain)"
        );

        let response = app
            .oneshot(post_json(
                "/api/questions/generate/",
                json!({"uid": "u-1", "goal": "full", "level": "mid", "domain": "web"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 8);
        assert_eq!(body["questions"].as_array().unwrap().len(), 8);
        assert_eq!(body["config"]["domain"], "web");
        assert_eq!(body["questions"][0]["type"], "conceptual");
    }
}
