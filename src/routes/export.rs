use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::dto::job_dto::CandidateFilter;
use crate::error::Result;
use crate::services::export_service::{ExportService, XLSX_CONTENT_TYPE};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/admin/api/candidates/export",
    params(CandidateFilter),
    responses(
        (status = 200, description = "XLSX workbook of candidates", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 404, description = "Job filter names an unknown job")
    )
)]
#[axum::debug_handler]
pub async fn export_candidates(
    State(state): State<AppState>,
    Query(filter): Query<CandidateFilter>,
) -> Result<impl IntoResponse> {
    let candidates = state.job_service.candidates(filter.job_id).await?;
    let job_titles: HashMap<_, _> = state
        .records
        .list_jobs()
        .await?
        .into_iter()
        .map(|job| (job.id, job.title))
        .collect();

    let buffer = ExportService::generate_candidates_xlsx(&candidates, &job_titles)?;
    let disposition = format!("attachment; filename=\"{}\"", ExportService::file_name());
    tracing::info!(rows = candidates.len(), "candidate export generated");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
