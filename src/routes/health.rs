use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up")
    )
)]
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let storage = if state.config.database_url.is_some() {
        "postgres"
    } else {
        "memory"
    };
    let body = json!({
        "status": "ok",
        "storage": storage,
    });
    (StatusCode::OK, Json(body))
}
