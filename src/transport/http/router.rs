use crate::domain::{NewPerson, Person, PersonUpdate};
use crate::transport::http::handlers::root::{OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use crate::transport::http::handlers::{health, persons, root};
use crate::transport::http::types::{
    AppState, DatabaseHealth, ErrorResponse, HealthResponse, RootResponse,
};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Person REST API",
        description = "A RESTful API for managing Person objects with full CRUD operations"
    ),
    paths(
        root::root_handler,
        health::healthcheck_handler,
        persons::create_person_handler,
        persons::list_persons_handler,
        persons::get_person_handler,
        persons::update_person_handler,
        persons::delete_person_handler
    ),
    components(schemas(
        Person,
        NewPerson,
        PersonUpdate,
        ErrorResponse,
        RootResponse,
        HealthResponse,
        DatabaseHealth
    )),
    tags(
        (name = "Root", description = "Service metadata"),
        (name = "Health", description = "Liveness and storage connectivity"),
        (name = "Persons", description = "Person CRUD operations")
    )
)]
pub struct ApiDoc;

/// API routes only, without docs or middleware.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/persons",
            get(persons::list_persons_handler).post(persons::create_person_handler),
        )
        .route(
            "/persons/:id",
            get(persons::get_person_handler)
                .put(persons::update_person_handler)
                .delete(persons::delete_person_handler),
        )
        .with_state(app_state)
}

/// Full application: routes, Swagger UI, permissive CORS and request tracing.
pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(app_state)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
