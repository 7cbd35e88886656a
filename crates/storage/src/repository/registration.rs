use chrono::Utc;
use sqlx::SqlitePool;

use crate::dto::registration::NewRegistration;
use crate::error::{Result, StorageError};
use crate::models::Registration;

/// Repository for the registrations store
pub struct RegistrationRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all registrations, most recent first
    pub async fn list(&self) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, event_id, event_name, council, name, class_name, year, roll_no, created_at
            FROM registrations
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(registrations)
    }

    pub async fn create(&self, registration: &NewRegistration) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (
                event_id, event_name, council, name, class_name, year, roll_no, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id, event_id, event_name, council, name, class_name, year, roll_no, created_at
            "#,
        )
        .bind(registration.event_id)
        .bind(&registration.event_name)
        .bind(&registration.council)
        .bind(&registration.name)
        .bind(&registration.class_name)
        .bind(registration.year)
        .bind(&registration.roll_no)
        .bind(Utc::now().naive_utc())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::on_unique_violation(e, "Roll number is already registered for this event")
        })?;

        Ok(registration)
    }

    /// First registration for the given event and roll number, if any
    pub async fn find_by_event_and_roll(
        &self,
        event_id: i64,
        roll_no: &str,
    ) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, event_id, event_name, council, name, class_name, year, roll_no, created_at
            FROM registrations
            WHERE event_id = ?1 AND roll_no = ?2
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(event_id)
        .bind(roll_no)
        .fetch_optional(self.pool)
        .await?;

        Ok(registration)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
