use chrono::NaiveDate;
use storage::{
    Database,
    dto::registration::{RegisterForm, UnregisterForm},
    models::{Event, Registration},
    repository::{event::EventRepository, registration::RegistrationRepository},
};
use validator::Validate;

use crate::error::{WebError, WebResult};

/// Register a student for an event.
///
/// Checks run in a fixed order: the event must exist, its registration window
/// must be open on `today`, then the form fields are validated.
pub async fn register(
    db: &Database,
    event_id: i64,
    form: RegisterForm,
    today: NaiveDate,
) -> WebResult<(Event, Registration)> {
    let event = find_event(db, event_id).await?;

    if !event.is_registration_open(today) {
        tracing::debug!(event_id, end_date = %event.end_date, %today, "registration closed");
        return Err(WebError::RegistrationClosed(format!(
            "Registration for {} closed on {}",
            event.name, event.end_date
        )));
    }

    let form = form.normalized();
    form.validate()?;

    let registrations = RegistrationRepository::new(db.registrations_pool());
    if registrations
        .find_by_event_and_roll(event.id, &form.roll_no)
        .await?
        .is_some()
    {
        return Err(WebError::Conflict(format!(
            "Roll number {} is already registered for {}",
            form.roll_no, event.name
        )));
    }

    let new_registration = form
        .into_new_registration(&event)
        .map_err(|e| WebError::BadRequest(e.to_string()))?;
    let registration = registrations.create(&new_registration).await?;

    tracing::info!(
        event_id,
        registration_id = registration.id,
        roll_no = %registration.roll_no,
        "registered"
    );
    Ok((event, registration))
}

/// Remove the registration matching `(event_id, roll_no)`.
pub async fn unregister(db: &Database, event_id: i64, form: UnregisterForm) -> WebResult<Event> {
    let form = form.normalized();
    form.validate()?;

    let event = find_event(db, event_id).await?;

    let registrations = RegistrationRepository::new(db.registrations_pool());
    let registration = registrations
        .find_by_event_and_roll(event.id, &form.roll_no)
        .await?
        .ok_or_else(|| {
            WebError::NotFound(format!(
                "No registration for roll number {} in {}",
                form.roll_no, event.name
            ))
        })?;

    registrations.delete(registration.id).await?;

    tracing::info!(
        event_id,
        registration_id = registration.id,
        roll_no = %registration.roll_no,
        "unregistered"
    );
    Ok(event)
}

/// List all registrations, most recent first
pub async fn list_registrations(db: &Database) -> WebResult<Vec<Registration>> {
    let repo = RegistrationRepository::new(db.registrations_pool());
    Ok(repo.list().await?)
}

async fn find_event(db: &Database, event_id: i64) -> WebResult<Event> {
    EventRepository::new(db.events_pool())
        .find_by_id(event_id)
        .await
        .map_err(|e| WebError::event_lookup(e, event_id))
}
