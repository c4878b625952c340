use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::infra::app_state::AppState;

/// Liveness plus a database round trip. Unhealthy answers 503.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    match state.unit_of_work().movie_types.find_all().await {
        Ok(types) => {
            health_status["checks"]["database"] = json!({
                "status": "healthy",
                "movie_types": types.len(),
            });
            (StatusCode::OK, Json(health_status))
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            health_status["status"] = json!("unhealthy");
            health_status["checks"]["database"] = json!({
                "status": "unhealthy",
                "error": e.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(health_status))
        }
    }
}
