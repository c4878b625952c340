pub mod v1;

use axum::{Router, routing::get};
use kinoteka_core::api_routes;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers::health::health_handler;
use crate::infra::cors::cors_layer;

/// Create the main API router with all versions
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest(api_routes::v1::ROOT, v1::create_v1_router())
}

/// The complete application: health, versioned API and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .route(api_routes::HEALTH, get(health_handler))
        .merge(create_api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
