use axum::{Json, extract::State};
use kinoteka_core::api_types::{ApiResponse, SearchQuery};
use kinoteka_model::{Movie, MovieSummary};

use crate::infra::{app_state::AppState, errors::AppResult, extract::{ApiPath, ApiQuery}};

/// Case-insensitive title search, newest release first
pub async fn search_movies_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<MovieSummary>>>> {
    let results = state.catalog().search_movies(&query.q).await?;
    Ok(Json(ApiResponse::success(results)))
}

/// Every movie linked to one category
pub async fn movies_by_category_handler(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<String>,
) -> AppResult<Json<ApiResponse<Vec<Movie>>>> {
    let movies = state.catalog().movies_by_category(&category_id).await?;
    Ok(Json(ApiResponse::success(movies)))
}
