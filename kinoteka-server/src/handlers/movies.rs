use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use kinoteka_core::api_types::{ApiResponse, Created};
use kinoteka_model::{Movie, MovieDraft, MovieFilters, MovieId};

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath, ApiQuery},
};

/// List movies, optionally narrowed by genre, category, type and age rating
pub async fn list_movies_handler(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<MovieFilters>,
) -> AppResult<Json<ApiResponse<Vec<Movie>>>> {
    let movies = state.catalog().list_movies(&filters).await?;
    Ok(Json(ApiResponse::success(movies)))
}

pub async fn get_movie_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<Movie>>> {
    let movie = state.catalog().find_movie(MovieId::new(id)).await?;
    Ok(Json(ApiResponse::success(movie)))
}

pub async fn create_movie_handler(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<MovieDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Created<MovieId>>>)> {
    let id = state.catalog().create_movie(&draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Created { id })),
    ))
}

/// Replace a movie's fields and every association list
pub async fn update_movie_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(draft): ApiJson<MovieDraft>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.catalog().update_movie(MovieId::new(id), &draft).await?;
    Ok(Json(ApiResponse::message("Movie updated")))
}

pub async fn delete_movie_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.catalog().delete_movie(MovieId::new(id)).await?;
    Ok(Json(ApiResponse::message("Movie deleted")))
}
