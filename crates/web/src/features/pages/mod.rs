pub mod handlers;
pub mod html;
pub mod routes;
