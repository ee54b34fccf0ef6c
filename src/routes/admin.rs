use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::dto::job_dto::{
    CandidateFilter, CandidateSummary, CreateJobPayload, DashboardResponse, DeleteJobResponse,
    JobDetailResponse, ToggleJobResponse, UpdateJobPayload,
};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/admin/api/dashboard",
    responses(
        (status = 200, description = "Jobs with links and application counts", body = DashboardResponse)
    )
)]
#[axum::debug_handler]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    Ok(Json(state.job_service.dashboard().await?))
}

#[utoipa::path(
    post,
    path = "/admin/api/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created with a fresh application link", body = Job),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    get,
    path = "/admin/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job with its candidates", body = JobDetailResponse),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>> {
    Ok(Json(state.job_service.detail(id).await?))
}

#[utoipa::path(
    patch,
    path = "/admin/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated", body = Job),
        (status = 400, description = "Invalid payload or date range"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<Json<Job>> {
    Ok(Json(state.job_service.update(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/admin/api/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job and its candidates deleted", body = DeleteJobResponse),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteJobResponse>> {
    state.job_service.delete(id).await?;
    Ok(Json(DeleteJobResponse {
        success: true,
        message: "Job and all associated applications deleted successfully".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/admin/api/jobs/{id}/toggle",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Active flag flipped", body = ToggleJobResponse),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn toggle_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleJobResponse>> {
    let job = state.job_service.toggle(id).await?;
    let message = if job.is_active {
        "Job activated successfully"
    } else {
        "Job deactivated successfully"
    };
    Ok(Json(ToggleJobResponse {
        success: true,
        is_active: job.is_active,
        message: message.to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/admin/api/candidates",
    params(CandidateFilter),
    responses(
        (status = 200, description = "Full candidate records, newest first", body = [Candidate]),
        (status = 404, description = "Job filter names an unknown job")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(filter): Query<CandidateFilter>,
) -> Result<Json<Vec<Candidate>>> {
    Ok(Json(state.job_service.candidates(filter.job_id).await?))
}

#[utoipa::path(
    get,
    path = "/admin/api/candidates/summary",
    responses(
        (status = 200, description = "Compact candidate export", body = [CandidateSummary])
    )
)]
#[axum::debug_handler]
pub async fn candidate_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateSummary>>> {
    Ok(Json(state.job_service.candidate_summaries().await?))
}

#[utoipa::path(
    get,
    path = "/admin/api/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "One application", body = Candidate),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Candidate>> {
    let candidate = state
        .records
        .get_candidate(id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(candidate))
}
