use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{about, events_page, home, registrations_page};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/events", get(events_page))
        .route("/registrations", get(registrations_page))
}
