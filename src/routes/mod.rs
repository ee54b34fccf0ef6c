pub mod admin;
pub mod apply;
pub mod chat;
pub mod docs;
pub mod export;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    auth::require_admin,
    cors::cors_layer,
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

/// Every route of the service, with shared layers applied.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let public_api = Router::new()
        .route("/apply/:link_token", get(apply::open_application))
        .route("/api/chat", post(chat::chat))
        .route("/api/upload-resume", post(chat::upload_resume))
        .route("/api/upload-video", post(chat::upload_video))
        .layer(from_fn_with_state(
            RateLimiter::new(config.public_rps),
            rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/jobs", post(admin::create_job))
        .route(
            "/jobs/:id",
            get(admin::get_job)
                .patch(admin::update_job)
                .delete(admin::delete_job),
        )
        .route("/jobs/:id/toggle", post(admin::toggle_job))
        .route("/candidates", get(admin::list_candidates))
        .route("/candidates/summary", get(admin::candidate_summaries))
        .route("/candidates/export", get(export::export_candidates))
        .route("/candidates/:id", get(admin::get_candidate))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(public_api)
        .nest("/admin/api", admin_api)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .with_state(state)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}
