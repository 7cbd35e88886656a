//! HTTP layer for the campus event registration service.

use std::any::Any;
use std::time::Duration;

use axum::{
    Json, Router,
    http::{StatusCode, Uri, header},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use storage::Database;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub mod config;
pub mod error;
pub mod features;

use error::WebError;
use features::{events, pages, registrations};

#[derive(OpenApi)]
#[openapi(
    paths(
        features::events::handlers::list_events,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::registrations::handlers::register,
        features::registrations::handlers::unregister,
        features::registrations::handlers::list_registrations,
    ),
    components(
        schemas(
            storage::dto::event::CreateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::event::EventListResponse,
            storage::dto::event::EventEnvelope,
            storage::dto::registration::RegisterForm,
            storage::dto::registration::UnregisterForm,
            storage::dto::registration::RegisterResponse,
            storage::dto::registration::RegistrationListResponse,
            storage::dto::common::MessageResponse,
            storage::models::Event,
            storage::models::Registration,
        )
    ),
    tags(
        (name = "events", description = "Event listing and creation"),
        (name = "registrations", description = "Registering and unregistering for events"),
    )
)]
pub struct ApiDoc;

/// Build the application router around an open database.
pub fn app(db: Database) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(pages::routes::routes())
        .nest("/api/events", events::routes::routes())
        .nest("/api/registrations", registrations::routes::api_routes())
        .nest("/event", registrations::routes::routes())
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed_envelope))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(db)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found(uri: Uri) -> WebError {
    WebError::NotFound(format!("No route for {}", uri.path()))
}

/// The router answers a known path with the wrong method itself, with an
/// empty body. Give that response the JSON envelope, keeping its `Allow` header.
async fn method_not_allowed_envelope(uri: Uri, response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut envelope =
        WebError::MethodNotAllowed(format!("Method not allowed for {}", uri.path()))
            .into_response();
    if let Some(allow) = allow {
        envelope.headers_mut().insert(header::ALLOW, allow);
    }
    envelope
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    WebError::InternalServerError(format!("handler panicked: {}", detail)).into_response()
}
