//! Handlers shared by the genre, category and age rating catalogs.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use kinoteka_core::AppUnitOfWork;
use kinoteka_core::api_types::{ApiResponse, Created};
use kinoteka_core::database::ports::{ReferenceEntity, ReferenceRepository};
use kinoteka_model::{AgeRating, CatalogId, Category, Genre, ReferenceDraft};
use serde::Serialize;

use crate::infra::{
    app_state::AppState,
    errors::AppResult,
    extract::{ApiJson, ApiPath},
};

/// A reference catalog exposed over HTTP.
pub trait CatalogReference: ReferenceEntity + Serialize {
    /// Capitalised name for response messages.
    const LABEL: &'static str;

    fn repository(uow: &AppUnitOfWork) -> &dyn ReferenceRepository<Self>;
}

impl CatalogReference for Genre {
    const LABEL: &'static str = "Genre";

    fn repository(uow: &AppUnitOfWork) -> &dyn ReferenceRepository<Self> {
        uow.genres.as_ref()
    }
}

impl CatalogReference for Category {
    const LABEL: &'static str = "Category";

    fn repository(uow: &AppUnitOfWork) -> &dyn ReferenceRepository<Self> {
        uow.categories.as_ref()
    }
}

impl CatalogReference for AgeRating {
    const LABEL: &'static str = "Age rating";

    fn repository(uow: &AppUnitOfWork) -> &dyn ReferenceRepository<Self> {
        uow.ages.as_ref()
    }
}

pub async fn list_references_handler<R>(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<R>>>>
where
    R: CatalogReference,
    R::Id: Serialize,
{
    let entries = R::repository(state.unit_of_work()).find_all().await?;
    Ok(Json(ApiResponse::success(entries)))
}

pub async fn get_reference_handler<R>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<R>>>
where
    R: CatalogReference,
    R::Id: Serialize,
{
    let entry = R::repository(state.unit_of_work())
        .find_by_id(R::Id::from_raw(id))
        .await?;
    Ok(Json(ApiResponse::success(entry)))
}

pub async fn create_reference_handler<R>(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ReferenceDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Created<R::Id>>>)>
where
    R: CatalogReference,
    R::Id: Serialize,
{
    let id = state
        .catalog()
        .create_reference(R::repository(state.unit_of_work()), &draft)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Created { id })),
    ))
}

pub async fn update_reference_handler<R>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(draft): ApiJson<ReferenceDraft>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: CatalogReference,
    R::Id: Serialize,
{
    state
        .catalog()
        .update_reference(
            R::repository(state.unit_of_work()),
            R::Id::from_raw(id),
            &draft,
        )
        .await?;
    Ok(Json(ApiResponse::message(format!("{} updated", R::LABEL))))
}

/// Fails with 409 while any movie still links to the entry
pub async fn delete_reference_handler<R>(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<()>>>
where
    R: CatalogReference,
    R::Id: Serialize,
{
    R::repository(state.unit_of_work())
        .delete(R::Id::from_raw(id))
        .await?;
    Ok(Json(ApiResponse::message(format!("{} deleted", R::LABEL))))
}
