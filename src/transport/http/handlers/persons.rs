use crate::domain::{NewPerson, Person, PersonUpdate};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{AppState, ErrorResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/persons",
    tag = "Persons",
    request_body = NewPerson,
    responses(
        (status = 201, description = "Person created", body = Person),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error or invalid JSON body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_person_handler(
    State(state): State<AppState>,
    request: Result<Json<NewPerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = request?;
    let person = state.person_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    get,
    path = "/persons",
    tag = "Persons",
    responses(
        (status = 200, description = "All persons", body = [Person]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_persons_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(state.person_service.list().await?))
}

#[utoipa::path(
    get,
    path = "/persons/{id}",
    tag = "Persons",
    params(("id" = String, Path, description = "Person id (UUID)")),
    responses(
        (status = 200, description = "The person", body = Person),
        (status = 404, description = "Person not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    state
        .person_service
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(id))
}

#[utoipa::path(
    put,
    path = "/persons/{id}",
    tag = "Persons",
    params(("id" = String, Path, description = "Person id (UUID)")),
    request_body = PersonUpdate,
    responses(
        (status = 200, description = "Updated person", body = Person),
        (status = 400, description = "No fields to update", body = ErrorResponse),
        (status = 404, description = "Person not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error or invalid JSON body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<PersonUpdate>, JsonRejection>,
) -> Result<Json<Person>, ApiError> {
    let Json(patch) = request?;
    state
        .person_service
        .update(&id, patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(id))
}

#[utoipa::path(
    delete,
    path = "/persons/{id}",
    tag = "Persons",
    params(("id" = String, Path, description = "Person id (UUID)")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 404, description = "Person not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.person_service.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(id))
    }
}
