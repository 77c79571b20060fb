/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// A stored value could not be turned back into a domain type
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }

    /// Map a unique-constraint violation to `Duplicate`, anything else to `Database`
    pub fn from_insert(err: sqlx::Error, what: &str) -> Self {
        let unique = err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            Self::Duplicate(what.to_string())
        } else {
            Self::Database(err)
        }
    }
}

impl From<StorageError> for planzen_core::PlanZenError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(what) => planzen_core::PlanZenError::duplicate(what),
            StorageError::Database(e) => planzen_core::PlanZenError::Database(e.to_string()),
            other => planzen_core::PlanZenError::storage(other.to_string()),
        }
    }
}
