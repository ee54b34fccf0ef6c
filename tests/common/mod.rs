#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use recruitease_backend::{config::Config, models::job::Job, routes::build_router, AppState};
use serde_json::{json, Value as JsonValue};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub uploads: TempDir,
}

pub fn test_app() -> TestApp {
    test_app_with(|_| {})
}

pub fn test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let uploads = tempfile::tempdir().expect("tempdir");
    let mut config = Config {
        uploads_dir: uploads.path().to_path_buf(),
        public_rps: 1000,
        public_base_url: "https://careers.example.com".to_string(),
        ..Config::default()
    };
    configure(&mut config);
    let state = AppState::in_memory(config).expect("state");
    TestApp {
        router: build_router(state.clone()),
        state,
        uploads,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("response")
    }

    pub async fn seed_job(&self, title: &str) -> Job {
        self.state
            .job_service
            .create(recruitease_backend::dto::job_dto::CreateJobPayload {
                title: title.to_string(),
                description: format!("{} role", title),
                days_valid: None,
            })
            .await
            .expect("seed job")
    }

    /// Opens the job link and returns the `Cookie` header value to reuse.
    pub async fn open_session(&self, job: &Job) -> String {
        let res = self
            .send(
                Request::builder()
                    .uri(format!("/apply/{}", job.link_hash))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        cookie_pair(&res).expect("session cookie")
    }

    pub async fn chat(&self, cookie: Option<&str>, message: &str) -> JsonValue {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let res = self
            .send(
                builder
                    .body(Body::from(json!({ "message": message }).to_string()))
                    .unwrap(),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        body_json(res).await
    }

    pub async fn upload(
        &self,
        path: &str,
        cookie: Option<&str>,
        field: &str,
        filename: &str,
        content: &[u8],
    ) -> (StatusCode, JsonValue) {
        let (content_type, body) = multipart_body(field, filename, content);
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let res = self.send(builder.body(Body::from(body)).unwrap()).await;
        let status = res.status();
        (status, body_json(res).await)
    }
}

/// `name=value` part of the response's `Set-Cookie` header.
pub fn cookie_pair(res: &Response<Body>) -> Option<String> {
    let raw = res.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    raw.split(';').next().map(|pair| pair.trim().to_string())
}

pub async fn body_json(res: Response<Body>) -> JsonValue {
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> (String, Vec<u8>) {
    let boundary = "recruiteaseTestBoundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}
