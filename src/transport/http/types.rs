use crate::app::{PersonService, StorageHealth};
use crate::infra::config::Settings;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub person_service: PersonService,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(person_service: PersonService, settings: Settings) -> Self {
        Self {
            person_service,
            settings: Arc::new(settings),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub description: String,
    pub version: String,
    /// Route -> short description.
    pub endpoints: BTreeMap<String, String>,
    /// Swagger UI location.
    pub docs: String,
    /// OpenAPI document location.
    pub openapi: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `unhealthy`.
    pub status: String,
    pub service: String,
    pub version: String,
    /// RFC 3339 UTC timestamp of the check.
    pub timestamp: String,
    pub database: DatabaseHealth,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DatabaseHealth {
    /// `healthy` or `unhealthy`.
    pub status: String,
    /// `connected` or `disconnected`.
    pub database: String,
    /// Storage backend in use (`memory` or `postgres`).
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<StorageHealth> for DatabaseHealth {
    fn from(h: StorageHealth) -> Self {
        Self {
            status: h.status().to_string(),
            database: h.connection().to_string(),
            backend: h.backend.to_string(),
            error: h.error,
        }
    }
}
