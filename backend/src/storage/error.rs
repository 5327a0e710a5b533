//! Storage error type shared by every repository.

/// Failure raised by a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A unique index rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A stored row could not be turned back into a domain record
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::UniqueViolation(db_err.message().to_string())
            }
            other => StorageError::Database(other),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
