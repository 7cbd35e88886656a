use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A registrant's entry for one event.
///
/// `event_name` and `council` are copied from the event when the row is
/// inserted and are never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub council: String,
    pub name: String,
    pub class_name: String,
    pub year: i32,
    pub roll_no: String,
    pub created_at: NaiveDateTime,
}
