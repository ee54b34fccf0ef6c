use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::dto::apply_dto::{ApplyResponse, PublicJob};
use crate::error::{Error, Result};
use crate::utils::session_cookie::{session_cookie, session_id_from};
use crate::AppState;

fn closed_message(code: &str) -> &'static str {
    match code {
        "job_expired" => "This job posting has expired and is no longer accepting applications",
        "job_inactive" => "This job posting has been deactivated",
        _ => "This job posting is not open for applications yet",
    }
}

#[utoipa::path(
    get,
    path = "/apply/{link_token}",
    params(
        ("link_token" = String, Path, description = "Shareable job link token")
    ),
    responses(
        (status = 200, description = "Session started for the job", body = ApplyResponse),
        (status = 403, description = "Job inactive or not yet open"),
        (status = 404, description = "Unknown link"),
        (status = 410, description = "Job expired")
    )
)]
#[axum::debug_handler]
pub async fn open_application(
    State(state): State<AppState>,
    Path(link_token): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    let previous = session_id_from(&headers);
    let opened = match state.chat_service.open(&link_token, previous.as_ref()).await {
        Ok(opened) => opened,
        Err(Error::Gone(code)) | Err(Error::Forbidden(code)) => {
            let status = if code == "job_expired" {
                StatusCode::GONE
            } else {
                StatusCode::FORBIDDEN
            };
            tracing::info!(error = %code, "application link refused");
            return Ok((
                status,
                Json(json!({
                    "error": code,
                    "message": closed_message(&code),
                })),
            )
                .into_response());
        }
        Err(err) => return Err(err),
    };

    let cookie = session_cookie(&opened.session_id, state.chat_service.session_ttl());
    let body = ApplyResponse {
        job: PublicJob::from(&opened.job),
        session_expires_at: opened.expires_at,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}
