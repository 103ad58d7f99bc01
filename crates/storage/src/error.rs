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

const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";
const FOREIGN_KEY_FAILED_MESSAGE: &str = "FOREIGN KEY constraint failed";

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e)) if e.is_unique_violation()
        )
    }

    /// Also true for `ON DELETE RESTRICT` failures, which SQLite reports as
    /// `SQLITE_CONSTRAINT_TRIGGER` rather than `SQLITE_CONSTRAINT_FOREIGNKEY`.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.is_foreign_key_violation()
                    || e.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER)
                    || e.message() == FOREIGN_KEY_FAILED_MESSAGE
            }
            _ => false,
        }
    }

    /// Replace a UNIQUE failure with a readable `ConstraintViolation`.
    pub(crate) fn on_unique_violation(self, message: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(message.to_string())
        } else {
            self
        }
    }

    /// Replace a FOREIGN KEY failure with a readable `ConstraintViolation`.
    pub(crate) fn on_foreign_key_violation(self, message: &str) -> Self {
        if self.is_foreign_key_violation() {
            StorageError::ConstraintViolation(message.to_string())
        } else {
            self
        }
    }
}
