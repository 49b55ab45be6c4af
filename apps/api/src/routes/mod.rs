pub mod health;
pub mod profiles;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::scoring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes();
    Router::new()
        .route("/health", get(health::health_handler))
        // Job profiles
        .route("/api/v1/profiles", get(profiles::handle_list_profiles))
        .route(
            "/api/v1/profiles/:category/:role",
            get(profiles::handle_get_profile),
        )
        // Resumes
        .route("/api/v1/resumes/parse", post(handlers::handle_parse))
        .route("/api/v1/resumes/score", post(handlers::handle_score))
        .route(
            "/api/v1/resumes/score-text",
            post(handlers::handle_score_text),
        )
        .route("/api/v1/resumes/rank", post(handlers::handle_rank))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
