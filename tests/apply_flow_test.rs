mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use recruitease_backend::models::job::JobChanges;
use serde_json::json;

use common::{body_json, cookie_pair, test_app};

const SESSION_EXPIRED: &str = "Session expired. Please start over from the job application link.";

#[tokio::test]
async fn applicant_completes_application_end_to_end() {
    let app = test_app();
    let job = app.seed_job("Data Analyst").await;

    let res = app
        .send(
            Request::builder()
                .uri(format!("/apply/{}", job.link_hash))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = cookie_pair(&res).unwrap();
    let body = body_json(res).await;
    assert_eq!(body["job"]["title"], "Data Analyst");
    assert!(body["job"].get("link_hash").is_none());
    assert!(body["session_expires_at"].is_string());

    let greeting = app.chat(Some(&cookie), "").await;
    assert!(greeting["response"]
        .as_str()
        .unwrap()
        .starts_with("Hi! I'm the RecruitEase chatbot."));

    let transcript = [
        ("hello", "Great! What is your first name?"),
        ("Asha", "What is your last name?"),
        ("Rao", "Please enter your personal email address:"),
        ("asha@example.com", "Please enter your 10-digit mobile number:"),
        ("12345", "Mobile number must be exactly 10 digits. Please try again:"),
        ("9876543210", "Would you like to provide an alternate contact number?"),
        ("skip", "What is your highest educational qualification?"),
        ("B.Tech", "Please enter your academic performance"),
        ("8.2 CGPA", "Are you currently employed?"),
        ("no", "Please enter up to 3 primary skills"),
        ("Python, SQL", "Please upload your resume"),
        ("here is my resume", "Please use the upload button to submit your resume."),
    ];
    for (message, expected) in transcript {
        let reply = app.chat(Some(&cookie), message).await;
        let text = reply["response"].as_str().unwrap();
        assert!(
            text.starts_with(expected),
            "after {:?} expected {:?}, got {:?}",
            message,
            expected,
            text
        );
    }

    let (status, upload) = app
        .upload("/api/upload-resume", Some(&cookie), "resume", "Asha CV.pdf", b"%PDF-1.4 test")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upload, json!({ "message": "Resume uploaded successfully" }));

    let reply = app.chat(Some(&cookie), "Resume uploaded").await;
    assert!(reply["response"]
        .as_str()
        .unwrap()
        .starts_with("Great! Now, please record a short self-introduction video"));

    let (status, upload) = app
        .upload("/api/upload-video", Some(&cookie), "video", "blob.webm", b"webm-bytes")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upload["stopRecording"], json!(true));

    app.chat(Some(&cookie), "Video uploaded").await;
    let reply = app.chat(Some(&cookie), "no").await;
    assert!(reply["response"].as_str().unwrap().starts_with("Please confirm"));

    let reply = app.chat(Some(&cookie), "nope").await;
    assert!(reply.get("completed").is_none());

    let done = app.chat(Some(&cookie), "YES").await;
    assert_eq!(done["completed"], json!(true));
    assert_eq!(done["stopRecording"], json!(true));
    assert!(done["response"]
        .as_str()
        .unwrap()
        .starts_with("Thank you for completing your application!"));

    let candidates = app.state.records.list_candidates(Some(job.id)).await.unwrap();
    assert_eq!(candidates.len(), 1);
    let candidate = &candidates[0];
    assert_eq!(candidate.full_name(), "Asha Rao");
    assert_eq!(candidate.total_experience, 0.0);
    assert_eq!(candidate.relevant_experience, 0.0);
    assert_eq!(candidate.current_company, None);
    assert_eq!(candidate.alternate_contact_no, None);
    assert!(candidate.resume_attachments.ends_with("_Asha_CV.pdf"));
    assert!(candidate
        .self_introduction_video
        .as_deref()
        .unwrap()
        .ends_with("_recording.webm"));

    let res = app
        .send(
            Request::builder()
                .uri(format!("/uploads/{}", candidate.resume_attachments))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let served = to_bytes(res.into_body(), 1024).await.unwrap();
    assert_eq!(&served[..], b"%PDF-1.4 test");

    let after = app.chat(Some(&cookie), "hello again").await;
    assert_eq!(after["response"], SESSION_EXPIRED);
}

#[tokio::test]
async fn expired_link_never_creates_a_session() {
    let app = test_app();
    let job = app.seed_job("Archivist").await;
    app.state
        .records
        .update_job(
            job.id,
            JobChanges {
                start_date: Some(Utc::now() - Duration::days(30)),
                end_date: Some(Utc::now() - Duration::days(1)),
                ..JobChanges::default()
            },
        )
        .await
        .unwrap();

    let res = app
        .send(
            Request::builder()
                .uri(format!("/apply/{}", job.link_hash))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(res.status(), StatusCode::GONE);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    let body = body_json(res).await;
    assert_eq!(body["error"], "job_expired");

    let reply = app.chat(None, "hello").await;
    assert_eq!(reply["response"], SESSION_EXPIRED);
}

#[tokio::test]
async fn inactive_and_future_jobs_are_forbidden() {
    let app = test_app();
    let inactive = app.seed_job("Paused").await;
    app.state.job_service.toggle(inactive.id).await.unwrap();

    let future = app.seed_job("Later").await;
    app.state
        .records
        .update_job(
            future.id,
            JobChanges {
                start_date: Some(Utc::now() + Duration::days(2)),
                ..JobChanges::default()
            },
        )
        .await
        .unwrap();

    for (job, code) in [(inactive, "job_inactive"), (future, "job_not_open")] {
        let res = app
            .send(
                Request::builder()
                    .uri(format!("/apply/{}", job.link_hash))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(res.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_json(res).await["error"], code);
    }
}

#[tokio::test]
async fn unknown_link_is_not_found() {
    let app = test_app();
    let res = app
        .send(
            Request::builder()
                .uri("/apply/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "Job not found");
}

#[tokio::test]
async fn employed_applicant_answers_experience_questions() {
    let app = test_app();
    let job = app.seed_job("Platform Engineer").await;
    let cookie = app.open_session(&job).await;

    for message in [
        "", "hi", "Ravi", "Kumar", "ravi@example.com", "9123456780", "9988776655", "M.Sc",
        "82%",
    ] {
        app.chat(Some(&cookie), message).await;
    }
    let reply = app.chat(Some(&cookie), "Acme Corp").await;
    assert_eq!(reply["response"], "What is your current designation?");
    app.chat(Some(&cookie), "SRE").await;
    app.chat(Some(&cookie), "4").await;

    let reply = app.chat(Some(&cookie), "6").await;
    assert!(reply["response"]
        .as_str()
        .unwrap()
        .starts_with("Relevant experience cannot exceed your total experience"));

    let reply = app.chat(Some(&cookie), "3").await;
    assert!(reply["response"]
        .as_str()
        .unwrap()
        .starts_with("Please enter up to 3 primary skills"));

    let reply = app.chat(Some(&cookie), "Go, Rust, Kubernetes, Terraform").await;
    assert!(reply["response"]
        .as_str()
        .unwrap()
        .contains("Please enter up to 3 primary skills"));
}
