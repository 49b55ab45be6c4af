use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::profile::JobProfile;
use crate::profiles::CategorySummary;
use crate::state::AppState;

/// GET /api/v1/profiles
pub async fn handle_list_profiles(State(state): State<AppState>) -> Json<Vec<CategorySummary>> {
    Json(state.profiles.categories())
}

/// GET /api/v1/profiles/:category/:role
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path((category, role)): Path<(String, String)>,
) -> Result<Json<JobProfile>, AppError> {
    state
        .profiles
        .get(&category, &role)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No job profile for '{category}' / '{role}'")))
}
