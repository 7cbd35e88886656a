use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e)) if e.is_unique_violation()
        )
    }

    /// Map a unique-index failure onto `ConstraintViolation` with a readable message.
    pub(crate) fn on_unique_violation(error: sqlx::Error, message: &str) -> Self {
        let error = StorageError::from(error);
        if error.is_unique_violation() {
            StorageError::ConstraintViolation(message.to_string())
        } else {
            error
        }
    }
}
