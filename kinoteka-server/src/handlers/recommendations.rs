use axum::{Json, extract::State, http::StatusCode};
use kinoteka_core::api_types::{ApiResponse, Created};
use kinoteka_model::{
    Recommendation, RecommendationDraft, RecommendationId,
    RecommendationUpdate,
};

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath},
};

pub async fn list_recommendations_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Recommendation>>>> {
    let slots = state.catalog().list_recommendations().await?;
    Ok(Json(ApiResponse::success(slots)))
}

pub async fn get_recommendation_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<Recommendation>>> {
    let slot = state
        .catalog()
        .find_recommendation(RecommendationId::new(id))
        .await?;
    Ok(Json(ApiResponse::success(slot)))
}

pub async fn create_recommendation_handler(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<RecommendationDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Created<RecommendationId>>>)> {
    let id = state.catalog().create_recommendation(&draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Created { id })),
    ))
}

pub async fn update_recommendation_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(update): ApiJson<RecommendationUpdate>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .update_recommendation(RecommendationId::new(id), &update)
        .await?;
    Ok(Json(ApiResponse::message("Recommendation updated")))
}

pub async fn delete_recommendation_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .delete_recommendation(RecommendationId::new(id))
        .await?;
    Ok(Json(ApiResponse::message("Recommendation deleted")))
}
