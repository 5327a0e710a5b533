//! Error type returned by every domain service.

use crate::domain::models::{ActivityValidationError, MemberValidationError, UserValidationError};
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    /// Failures outside storage, such as hashing or token signing
    #[error("internal error: {0}")]
    Internal(String),
    #[error("persistence failure: {0}")]
    Persistence(#[source] StorageError),
}

impl DomainError {
    pub fn not_found(what: &str, id: &str) -> Self {
        DomainError::NotFound(format!("{} not found: {}", what, id))
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UniqueViolation(message) => DomainError::Conflict(message),
            other => DomainError::Persistence(other),
        }
    }
}

impl From<ActivityValidationError> for DomainError {
    fn from(err: ActivityValidationError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

impl From<MemberValidationError> for DomainError {
    fn from(err: MemberValidationError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

impl From<UserValidationError> for DomainError {
    fn from(err: UserValidationError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_domain_kinds() {
        let conflict: DomainError = StorageError::UniqueViolation("UNIQUE constraint failed".into()).into();
        assert!(matches!(conflict, DomainError::Conflict(_)));

        let corrupt: DomainError = StorageError::Corrupt("bad row".into()).into();
        assert!(matches!(corrupt, DomainError::Persistence(_)));
    }

    #[test]
    fn test_validation_errors_keep_their_message() {
        let err: DomainError = ActivityValidationError::DescriptionTooShort.into();
        assert_eq!(err.to_string(), "Description must have at least 5 characters");
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
