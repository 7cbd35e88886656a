use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub council: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub venue: String,
    pub created_at: NaiveDateTime,
}

impl Event {
    /// Registration stays open through the end date, inclusive.
    pub fn is_registration_open(&self, today: NaiveDate) -> bool {
        today <= self.end_date
    }
}
