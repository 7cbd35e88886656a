use axum::{
    Form, Json,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::MessageResponse,
        registration::{RegisterForm, RegisterResponse, RegistrationListResponse, UnregisterForm},
    },
};

use crate::error::WebError;
use crate::features::events::services::today;

use super::services;

#[utoipa::path(
    post,
    path = "/event/{id}/register",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Registered", body = RegisterResponse),
        (status = 400, description = "Registration closed or invalid field"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Roll number already registered for this event")
    ),
    tag = "registrations"
)]
pub async fn register(
    State(db): State<Database>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> Result<Response, WebError> {
    let Path(event_id) = id?;
    let Form(form) = form?;

    let (event, registration) = services::register(&db, event_id, form, today()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: format!("Successfully registered for {}", event.name),
            registration,
        }),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/event/{id}/unregister",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body(content = UnregisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Unregistered", body = MessageResponse),
        (status = 400, description = "Missing roll_no"),
        (status = 404, description = "Event or registration not found")
    ),
    tag = "registrations"
)]
pub async fn unregister(
    State(db): State<Database>,
    id: Result<Path<i64>, PathRejection>,
    form: Result<Form<UnregisterForm>, FormRejection>,
) -> Result<Json<MessageResponse>, WebError> {
    let Path(event_id) = id?;
    let Form(form) = form?;

    let event = services::unregister(&db, event_id, form).await?;

    Ok(Json(MessageResponse::ok(format!(
        "Successfully unregistered from {}",
        event.name
    ))))
}

#[utoipa::path(
    get,
    path = "/api/registrations",
    responses(
        (status = 200, description = "All registrations, newest first", body = RegistrationListResponse)
    ),
    tag = "registrations"
)]
pub async fn list_registrations(
    State(db): State<Database>,
) -> Result<Json<RegistrationListResponse>, WebError> {
    let registrations = services::list_registrations(&db).await?;

    Ok(Json(RegistrationListResponse {
        success: true,
        total_registrations: registrations.len(),
        registrations,
    }))
}
