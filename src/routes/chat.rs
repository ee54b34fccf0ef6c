use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::{IntoResponse, Json, Response},
};
use bytes::Bytes;

use crate::dto::chat_dto::{ChatReply, ChatRequest, UploadResponse};
use crate::error::{Error, Result};
use crate::models::upload::UploadCategory;
use crate::utils::session_cookie::session_id_from;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Next chatbot message", body = ChatReply)
    )
)]
#[axum::debug_handler]
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let session_id = session_id_from(&headers);
    let reply = state
        .chat_service
        .chat(session_id.as_ref(), &payload.message)
        .await?;
    Ok(Json(reply))
}

/// First multipart part named `field_name`, as (filename, body).
async fn read_file_field(multipart: &mut Multipart, field_name: &str) -> Result<Option<(String, Bytes)>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        return Ok(Some((filename, data)));
    }
    Ok(None)
}

async fn handle_upload(
    state: &AppState,
    headers: &HeaderMap,
    mut multipart: Multipart,
    category: UploadCategory,
) -> Response {
    let session_id = session_id_from(headers);
    let result: Result<&'static str> = async {
        let (filename, data) = read_file_field(&mut multipart, category.form_field())
            .await?
            .ok_or_else(|| Error::BadRequest("No file uploaded".to_string()))?;
        state
            .chat_service
            .upload(session_id.as_ref(), category, &filename, &data)
            .await
    }
    .await;

    let stop_recording = (category == UploadCategory::Video).then_some(true);
    match result {
        Ok(message) => Json(UploadResponse {
            message: Some(message.to_string()),
            error: None,
            stop_recording,
        })
        .into_response(),
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                tracing::error!(category = category.dir(), error = %err, "upload failed");
            } else {
                tracing::info!(category = category.dir(), error = %err, "upload rejected");
            }
            (
                status,
                Json(UploadResponse {
                    message: None,
                    error: Some(err.client_message()),
                    stop_recording,
                }),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/upload-resume",
    request_body(content = String, content_type = "multipart/form-data", description = "Field `resume`: PDF, DOC or DOCX"),
    responses(
        (status = 200, description = "Resume stored", body = UploadResponse),
        (status = 400, description = "Missing file, bad type or no session", body = UploadResponse)
    )
)]
#[axum::debug_handler]
pub async fn upload_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    handle_upload(&state, &headers, multipart, UploadCategory::Resume).await
}

#[utoipa::path(
    post,
    path = "/api/upload-video",
    request_body(content = String, content_type = "multipart/form-data", description = "Field `video`: MP4, WebM or MOV"),
    responses(
        (status = 200, description = "Video stored", body = UploadResponse),
        (status = 400, description = "Missing file, bad type or no session", body = UploadResponse)
    )
)]
#[axum::debug_handler]
pub async fn upload_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    handle_upload(&state, &headers, multipart, UploadCategory::Video).await
}

