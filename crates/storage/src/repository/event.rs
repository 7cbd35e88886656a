use chrono::Utc;
use sqlx::SqlitePool;

use crate::dto::event::NewEvent;
use crate::error::{Result, StorageError};
use crate::models::Event;

/// Repository for the events store
pub struct EventRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all events, earliest start first
    pub async fn list(&self) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, council, start_date, end_date, venue, created_at
            FROM events
            ORDER BY start_date ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(events)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, council, start_date, end_date, venue, created_at
            FROM events
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    /// Insert an event; the store assigns the id
    pub async fn create(&self, event: &NewEvent) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (name, council, start_date, end_date, venue, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, name, council, start_date, end_date, venue, created_at
            "#,
        )
        .bind(&event.name)
        .bind(&event.council)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.venue)
        .bind(Utc::now().naive_utc())
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM events")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Remove every event. Only reseeding calls this.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM events")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
