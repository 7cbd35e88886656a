use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{list_registrations, register, unregister};

/// Form endpoints, mounted under `/event`
pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:id/register", post(register))
        .route("/:id/unregister", post(unregister))
}

/// JSON endpoints, mounted under `/api/registrations`
pub fn api_routes() -> Router<Database> {
    Router::new().route("/", get(list_registrations))
}
