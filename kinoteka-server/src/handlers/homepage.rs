use axum::{Json, extract::State};
use kinoteka_core::api_types::ApiResponse;
use kinoteka_model::Homepage;

use crate::infra::{app_state::AppState, errors::AppResult};

/// Recommended movies, category shelves, genres and age ratings
pub async fn homepage_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Homepage>>> {
    let page = state.catalog().homepage().await?;
    Ok(Json(ApiResponse::success(page)))
}
