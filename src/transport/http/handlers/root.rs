use crate::transport::http::types::{AppState, RootResponse};
use axum::extract::State;
use axum::Json;

pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /health", "Healthcheck endpoint"),
    ("GET /persons", "Get all persons"),
    ("GET /persons/{id}", "Get a specific person"),
    ("POST /persons", "Create a new person"),
    ("PUT /persons/{id}", "Update a person"),
    ("DELETE /persons/{id}", "Delete a person"),
];

#[utoipa::path(
    get,
    path = "/",
    tag = "Root",
    responses(
        (status = 200, description = "Service metadata", body = RootResponse)
    )
)]
pub async fn root_handler(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to the {}", state.settings.app_name),
        description: state.settings.description.clone(),
        version: state.settings.app_version.clone(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(route, desc)| (route.to_string(), desc.to_string()))
            .collect(),
        docs: SWAGGER_UI_PATH.to_string(),
        openapi: OPENAPI_JSON_PATH.to_string(),
    })
}
