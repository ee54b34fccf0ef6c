use axum::Json;
use utoipa::OpenApi;

use crate::dto::apply_dto::{ApplyResponse, PublicJob};
use crate::dto::chat_dto::{ChatReply, ChatRequest, UploadResponse};
use crate::dto::job_dto::{
    CandidateSummary, CreateJobPayload, DashboardResponse, DeleteJobResponse, JobDetailResponse,
    JobOverview, ToggleJobResponse, UpdateJobPayload,
};
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::routes::{admin, apply, chat, export, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        apply::open_application,
        chat::chat,
        chat::upload_resume,
        chat::upload_video,
        admin::dashboard,
        admin::create_job,
        admin::get_job,
        admin::update_job,
        admin::delete_job,
        admin::toggle_job,
        admin::list_candidates,
        admin::candidate_summaries,
        admin::get_candidate,
        export::export_candidates,
    ),
    components(schemas(
        Job,
        Candidate,
        PublicJob,
        ApplyResponse,
        ChatRequest,
        ChatReply,
        UploadResponse,
        CreateJobPayload,
        UpdateJobPayload,
        JobOverview,
        DashboardResponse,
        JobDetailResponse,
        ToggleJobResponse,
        DeleteJobResponse,
        CandidateSummary,
    )),
    tags(
        (name = "recruitease", description = "Job application intake")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
