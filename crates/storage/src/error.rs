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

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown park id: {0}")]
    InvalidReference(i64),

    #[error("Not enough parks available")]
    NotEnoughItems,

    #[error("Catalog error: {0}")]
    Catalog(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e)) if e.is_unique_violation()
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e)) if e.is_foreign_key_violation()
        )
    }

    pub fn is_check_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e)) if e.is_check_violation()
        )
    }

    /// Caller-side mistakes, as opposed to store failures.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            StorageError::InvalidArgument(_)
                | StorageError::InvalidReference(_)
                | StorageError::NotEnoughItems
        )
    }

    /// Fold database constraint errors into [`StorageError::ConstraintViolation`].
    pub fn classify(self) -> Self {
        if self.is_unique_violation() || self.is_foreign_key_violation() || self.is_check_violation()
        {
            let message = match &self {
                StorageError::Database(sqlx::Error::Database(e)) => e.message().to_string(),
                other => other.to_string(),
            };
            return StorageError::ConstraintViolation(message);
        }
        self
    }
}
