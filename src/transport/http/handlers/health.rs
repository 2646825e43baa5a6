use crate::transport::http::types::{AppState, DatabaseHealth, HealthResponse};
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};

/// Always answers 200; an unreachable backend shows up as `"status": "unhealthy"` in the body.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service health, including storage connectivity", body = HealthResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = state.person_service.health().await;

    Json(HealthResponse {
        status: storage.status().to_string(),
        service: state.settings.app_name.clone(),
        version: state.settings.app_version.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        database: DatabaseHealth::from(storage),
    })
}
