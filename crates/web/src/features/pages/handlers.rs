use axum::{extract::State, response::Html};
use storage::Database;

use crate::error::WebError;
use crate::features::events::services::{self as events, today};
use crate::features::registrations::services as registrations;

use super::html;

pub async fn home() -> &'static str {
    "Welcome to CrceConnect!"
}

pub async fn about() -> &'static str {
    "About CrceConnect"
}

pub async fn events_page(State(db): State<Database>) -> Result<Html<String>, WebError> {
    let events = events::list_events(&db).await?;

    Ok(Html(html::events_page(&events, today())))
}

pub async fn registrations_page(State(db): State<Database>) -> Result<Html<String>, WebError> {
    let registrations = registrations::list_registrations(&db).await?;

    Ok(Html(html::registrations_page(&registrations)))
}
