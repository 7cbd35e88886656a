use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::event::{CreateEventRequest, EventEnvelope, EventListResponse, EventResponse},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "All events ordered by start date", body = EventListResponse)
    ),
    tag = "events"
)]
pub async fn list_events(State(db): State<Database>) -> Result<Json<EventListResponse>, WebError> {
    let events = services::list_events(&db).await?;
    let today = services::today();

    let events: Vec<EventResponse> = events
        .into_iter()
        .map(|event| EventResponse::from_event(event, today))
        .collect();

    Ok(Json(EventListResponse {
        success: true,
        total_events: events.len(),
        events,
    }))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = EventEnvelope),
        (status = 404, description = "Event not found")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, WebError> {
    let Path(id) = id?;
    let event = services::get_event(&db, id).await?;

    Ok(Json(EventEnvelope {
        success: true,
        event: EventResponse::from_event(event, services::today()),
    })
    .into_response())
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created successfully", body = EventEnvelope),
        (status = 400, description = "Missing or invalid field")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;

    let event = services::create_event(&db, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(EventEnvelope {
            success: true,
            event: EventResponse::from_event(event, services::today()),
        }),
    )
        .into_response())
}
