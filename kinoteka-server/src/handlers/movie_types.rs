use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use kinoteka_core::api_types::{ApiResponse, Created};
use kinoteka_model::{MovieType, MovieTypeDraft, MovieTypeId};

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath},
};

pub async fn list_movie_types_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MovieType>>>> {
    let types = state.unit_of_work().movie_types.find_all().await?;
    Ok(Json(ApiResponse::success(types)))
}

pub async fn get_movie_type_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<MovieType>>> {
    let movie_type = state
        .unit_of_work()
        .movie_types
        .find_by_id(MovieTypeId::new(id))
        .await?;
    Ok(Json(ApiResponse::success(movie_type)))
}

pub async fn create_movie_type_handler(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<MovieTypeDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Created<MovieTypeId>>>)> {
    let id = state.catalog().create_movie_type(&draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Created { id })),
    ))
}

pub async fn update_movie_type_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(draft): ApiJson<MovieTypeDraft>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .update_movie_type(MovieTypeId::new(id), &draft)
        .await?;
    Ok(Json(ApiResponse::message("Movie type updated")))
}

pub async fn delete_movie_type_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .unit_of_work()
        .movie_types
        .delete(MovieTypeId::new(id))
        .await?;
    Ok(Json(ApiResponse::message("Movie type deleted")))
}
