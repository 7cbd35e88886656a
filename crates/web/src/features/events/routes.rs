use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{create_event, get_event, list_events};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event))
}
