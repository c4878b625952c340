use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use kinoteka_core::api_types::{ApiResponse, Created};
use kinoteka_model::{
    EpisodeDraft, EpisodeId, MovieId, Season, SeasonDraft, SeasonId,
    SeasonUpdate,
};

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath},
};

pub async fn list_seasons_handler(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<Vec<Season>>>> {
    let seasons = state.catalog().list_seasons(MovieId::new(movie_id)).await?;
    Ok(Json(ApiResponse::success(seasons)))
}

/// Add a season together with its episodes
pub async fn create_season_handler(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<i32>,
    ApiJson(draft): ApiJson<SeasonDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Created<SeasonId>>>)> {
    let id = state
        .catalog()
        .add_season(MovieId::new(movie_id), &draft)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Created { id })),
    ))
}

pub async fn update_season_handler(
    State(state): State<AppState>,
    ApiPath((movie_id, season_id)): ApiPath<(i32, i32)>,
    ApiJson(update): ApiJson<SeasonUpdate>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .update_season(MovieId::new(movie_id), SeasonId::new(season_id), &update)
        .await?;
    Ok(Json(ApiResponse::message("Season updated")))
}

pub async fn delete_season_handler(
    State(state): State<AppState>,
    ApiPath((movie_id, season_id)): ApiPath<(i32, i32)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .delete_season(MovieId::new(movie_id), SeasonId::new(season_id))
        .await?;
    Ok(Json(ApiResponse::message("Season deleted")))
}

pub async fn create_episode_handler(
    State(state): State<AppState>,
    ApiPath((movie_id, season_id)): ApiPath<(i32, i32)>,
    ApiJson(draft): ApiJson<EpisodeDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Created<EpisodeId>>>)> {
    let id = state
        .catalog()
        .add_episode(MovieId::new(movie_id), SeasonId::new(season_id), &draft)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Created { id })),
    ))
}

pub async fn update_episode_handler(
    State(state): State<AppState>,
    ApiPath((movie_id, season_id, episode_id)): ApiPath<(i32, i32, i32)>,
    ApiJson(draft): ApiJson<EpisodeDraft>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .update_episode(
            MovieId::new(movie_id),
            SeasonId::new(season_id),
            EpisodeId::new(episode_id),
            &draft,
        )
        .await?;
    Ok(Json(ApiResponse::message("Episode updated")))
}

pub async fn delete_episode_handler(
    State(state): State<AppState>,
    ApiPath((movie_id, season_id, episode_id)): ApiPath<(i32, i32, i32)>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .catalog()
        .delete_episode(
            MovieId::new(movie_id),
            SeasonId::new(season_id),
            EpisodeId::new(episode_id),
        )
        .await?;
    Ok(Json(ApiResponse::message("Episode deleted")))
}
