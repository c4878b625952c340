use axum::{Json, extract::State};
use kinoteka_core::api_types::{ApiResponse, MediaPathQuery};
use kinoteka_model::{MediaUpdate, MovieId, MovieMedia};

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath, ApiQuery},
};

pub async fn get_media_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<MovieMedia>>> {
    let media = state.catalog().movie_media(MovieId::new(id)).await?;
    Ok(Json(ApiResponse::success(media)))
}

/// Set the cover and/or append screenshots. Paths are stored as given.
pub async fn add_media_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(update): ApiJson<MediaUpdate>,
) -> AppResult<Json<ApiResponse<MovieMedia>>> {
    let media = state.catalog().add_media(MovieId::new(id), &update).await?;
    Ok(Json(ApiResponse::success(media)))
}

pub async fn remove_media_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<MediaPathQuery>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .remove_media(MovieId::new(id), &query.path)
        .await?;
    Ok(Json(ApiResponse::message("Media removed")))
}
