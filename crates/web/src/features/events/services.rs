use chrono::NaiveDate;
use storage::{
    Database, dto::event::CreateEventRequest, models::Event, repository::event::EventRepository,
};
use validator::Validate;

use crate::error::{WebError, WebResult};

/// The server's local calendar date, used for registration window checks.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// List all events, earliest start first
pub async fn list_events(db: &Database) -> WebResult<Vec<Event>> {
    let repo = EventRepository::new(db.events_pool());
    Ok(repo.list().await?)
}

/// Get an event by id
pub async fn get_event(db: &Database, id: i64) -> WebResult<Event> {
    let repo = EventRepository::new(db.events_pool());
    repo.find_by_id(id)
        .await
        .map_err(|e| WebError::event_lookup(e, id))
}

/// Validate and insert a new event
pub async fn create_event(db: &Database, request: CreateEventRequest) -> WebResult<Event> {
    let request = request.normalized();
    request.validate()?;

    let new_event = request
        .into_new_event()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let repo = EventRepository::new(db.events_pool());
    let event = repo.create(&new_event).await?;

    tracing::info!(event_id = event.id, name = %event.name, "event created");
    Ok(event)
}
