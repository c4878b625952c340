use axum::{
    Router,
    routing::{get, post, put},
};
use kinoteka_model::{AgeRating, Category, Genre};

use crate::AppState;
use crate::handlers::{
    homepage, media, movie_types, movies, recommendations,
    references::{self, CatalogReference},
    search, seasons,
};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .merge(create_movie_routes())
        .merge(create_season_routes())
        .merge(create_reference_routes::<Genre>("/genres"))
        .merge(create_reference_routes::<Category>("/categories"))
        .merge(create_reference_routes::<AgeRating>("/ages"))
        .merge(create_movie_type_routes())
        .merge(create_recommendation_routes())
        .route("/homepage", get(homepage::homepage_handler))
        .route("/search", get(search::search_movies_handler))
        .route(
            "/search/{category_id}",
            get(search::movies_by_category_handler),
        )
}

fn create_movie_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(movies::list_movies_handler).post(movies::create_movie_handler),
        )
        .route(
            "/movies/{id}",
            get(movies::get_movie_handler)
                .put(movies::update_movie_handler)
                .delete(movies::delete_movie_handler),
        )
        .route(
            "/movies/{id}/media",
            get(media::get_media_handler)
                .patch(media::add_media_handler)
                .delete(media::remove_media_handler),
        )
}

fn create_season_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movies/{id}/seasons",
            get(seasons::list_seasons_handler)
                .post(seasons::create_season_handler),
        )
        .route(
            "/movies/{id}/seasons/{season_id}",
            put(seasons::update_season_handler)
                .delete(seasons::delete_season_handler),
        )
        .route(
            "/movies/{id}/seasons/{season_id}/episodes",
            post(seasons::create_episode_handler),
        )
        .route(
            "/movies/{id}/seasons/{season_id}/episodes/{episode_id}",
            put(seasons::update_episode_handler)
                .delete(seasons::delete_episode_handler),
        )
}

fn create_reference_routes<R>(base: &str) -> Router<AppState>
where
    R: CatalogReference,
    R::Id: serde::Serialize,
{
    Router::new()
        .route(
            base,
            get(references::list_references_handler::<R>)
                .post(references::create_reference_handler::<R>),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(references::get_reference_handler::<R>)
                .put(references::update_reference_handler::<R>)
                .delete(references::delete_reference_handler::<R>),
        )
}

fn create_movie_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movie-types",
            get(movie_types::list_movie_types_handler)
                .post(movie_types::create_movie_type_handler),
        )
        .route(
            "/movie-types/{id}",
            get(movie_types::get_movie_type_handler)
                .put(movie_types::update_movie_type_handler)
                .delete(movie_types::delete_movie_type_handler),
        )
}

fn create_recommendation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recommendations",
            get(recommendations::list_recommendations_handler)
                .post(recommendations::create_recommendation_handler),
        )
        .route(
            "/recommendations/{id}",
            get(recommendations::get_recommendation_handler)
                .put(recommendations::update_recommendation_handler)
                .delete(recommendations::delete_recommendation_handler),
        )
}
